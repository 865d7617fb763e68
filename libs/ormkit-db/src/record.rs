//! Timestamp bookkeeping and UUID identity for record entities.
//!
//! Expressed as entity traits with explicit column declarations, no implicit
//! defaults: an entity opts in by naming its bookkeeping columns, and the
//! blanket active-model traits supply the stamping behavior on top.
//!
//! # Example
//! ```rust,ignore
//! impl TimestampedEntity for widget::Entity {
//!     fn created_at_col() -> Self::Column { widget::Column::CreatedAt }
//!     fn modified_at_col() -> Self::Column { widget::Column::ModifiedAt }
//!     fn deleted_at_col() -> Self::Column { widget::Column::DeletedAt }
//! }
//!
//! #[async_trait::async_trait]
//! impl ActiveModelBehavior for widget::ActiveModel {
//!     async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
//!     where
//!         C: ConnectionTrait,
//!     {
//!         self.stamp_for_save(insert);
//!         Ok(self)
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, Value};
use tracing::trace;
use uuid::Uuid;

use ormkit_utils::{generate_uuid, utc_now};

/// Entities carrying created/modified/deleted bookkeeping columns.
pub trait TimestampedEntity: EntityTrait {
    /// Set once at insert, never updated afterwards.
    fn created_at_col() -> Self::Column;
    /// `NULL` until the first update, refreshed on every update.
    fn modified_at_col() -> Self::Column;
    /// `NULL` until an explicit soft delete.
    fn deleted_at_col() -> Self::Column;
}

/// Entities keyed by a client-generated UUID primary key.
pub trait RecordEntity: TimestampedEntity {
    fn id_col() -> Self::Column;
}

/// Bookkeeping stamps for active models of a [`TimestampedEntity`].
pub trait TimestampedActiveModel: ActiveModelTrait
where
    Self::Entity: TimestampedEntity,
{
    /// Stamp bookkeeping columns for a pending save.
    ///
    /// On insert, `created_at` is set unless the caller already supplied a
    /// value; on update, `modified_at` is refreshed. Call this from
    /// `ActiveModelBehavior::before_save`.
    fn stamp_for_save(&mut self, insert: bool) {
        if insert {
            let current = self.get(<Self::Entity as TimestampedEntity>::created_at_col());
            if matches!(current, ActiveValue::NotSet) {
                self.set(
                    <Self::Entity as TimestampedEntity>::created_at_col(),
                    utc_now().into(),
                );
            }
        } else {
            self.set(
                <Self::Entity as TimestampedEntity>::modified_at_col(),
                utc_now().into(),
            );
        }
    }

    /// Stamp `deleted_at` with the current UTC time and return the stamp.
    ///
    /// Soft deletion is a logical flag; the row is not removed and no
    /// cascading or un-delete is performed.
    fn soft_delete(&mut self) -> DateTime<Utc> {
        trace!("soft-deleting record");
        let now = utc_now();
        self.set(
            <Self::Entity as TimestampedEntity>::deleted_at_col(),
            now.into(),
        );
        now
    }
}

impl<A> TimestampedActiveModel for A
where
    A: ActiveModelTrait,
    A::Entity: TimestampedEntity,
{
}

/// Identity handling for active models of a [`RecordEntity`].
pub trait RecordActiveModel: ActiveModelTrait
where
    Self::Entity: RecordEntity,
{
    /// Fresh active model with a client-side v4 UUID already assigned, so
    /// the record has a usable identity before any persistence step.
    #[must_use]
    fn new_record() -> Self {
        let mut am = <Self as ActiveModelTrait>::default();
        am.set(
            <Self::Entity as RecordEntity>::id_col(),
            generate_uuid().into(),
        );
        am
    }

    /// The primary key, or `None` for a detached model without one.
    fn record_id(&self) -> Option<Uuid> {
        match self.get(<Self::Entity as RecordEntity>::id_col()) {
            ActiveValue::Set(Value::Uuid(Some(id)))
            | ActiveValue::Unchanged(Value::Uuid(Some(id))) => Some(*id),
            _ => None,
        }
    }
}

impl<A> RecordActiveModel for A
where
    A: ActiveModelTrait,
    A::Entity: RecordEntity,
{
}

/// Identity semantics for record models: UUID equality, a hash taken from
/// the UUID's integer form, and a representation that tolerates a missing
/// id.
pub trait RecordIdentity {
    /// The id, if assigned/loaded.
    fn record_id(&self) -> Option<Uuid>;

    /// Short type label used by [`RecordIdentity::record_repr`].
    fn record_label(&self) -> &str;

    /// Two records are the same iff both ids are present and equal.
    ///
    /// Two records without ids are *not* the same: identity comes from the
    /// assigned key, never from the accident of both being unassigned.
    fn same_record(&self, other: &Self) -> bool {
        match (self.record_id(), other.record_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Hash consistent with [`RecordIdentity::same_record`]: the UUID's
    /// 128-bit integer form, zero when no id is assigned.
    fn identity_hash(&self) -> u128 {
        self.record_id().map_or(0, |id| id.as_u128())
    }

    /// Defensive representation; see [`record_repr`].
    fn record_repr(&self) -> String {
        record_repr(self.record_label(), self.record_id())
    }
}

/// `label(id=...)`, degrading to `label(id=None)` when identity is absent.
///
/// Never fails: a detached or not-yet-persisted record prints the `None`
/// form instead of surfacing its unloaded state.
#[must_use]
pub fn record_repr(label: &str, id: Option<Uuid>) -> String {
    match id {
        Some(id) => format!("{label}(id={id})"),
        None => format!("{label}(id=None)"),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        RecordActiveModel, RecordEntity, RecordIdentity, TimestampedActiveModel,
        TimestampedEntity, record_repr,
    };
    use ormkit_utils::{generate_uuid, utc_now};
    use sea_orm::ActiveValue;

    mod widget {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "widgets")]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub id: Uuid,
            pub name: String,
            pub created_at: DateTimeUtc,
            pub modified_at: Option<DateTimeUtc>,
            pub deleted_at: Option<DateTimeUtc>,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    impl TimestampedEntity for widget::Entity {
        fn created_at_col() -> Self::Column {
            widget::Column::CreatedAt
        }
        fn modified_at_col() -> Self::Column {
            widget::Column::ModifiedAt
        }
        fn deleted_at_col() -> Self::Column {
            widget::Column::DeletedAt
        }
    }

    impl RecordEntity for widget::Entity {
        fn id_col() -> Self::Column {
            widget::Column::Id
        }
    }

    impl RecordIdentity for widget::Model {
        fn record_id(&self) -> Option<uuid::Uuid> {
            Some(self.id)
        }
        fn record_label(&self) -> &str {
            "Widget"
        }
    }

    fn sample_model() -> widget::Model {
        widget::Model {
            id: generate_uuid(),
            name: "anvil".to_owned(),
            created_at: utc_now(),
            modified_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn new_record_has_an_id_before_persistence() {
        let am = widget::ActiveModel::new_record();
        assert!(am.record_id().is_some());
    }

    #[test]
    fn detached_active_model_has_no_id() {
        let am = widget::ActiveModel::default();
        assert_eq!(am.record_id(), None);
    }

    #[test]
    fn insert_stamp_sets_created_at_only() {
        let mut am = widget::ActiveModel::new_record();
        am.stamp_for_save(true);
        assert!(matches!(am.created_at, ActiveValue::Set(_)));
        assert!(matches!(am.modified_at, ActiveValue::NotSet));
    }

    #[test]
    fn insert_stamp_respects_caller_supplied_created_at() {
        let fixed = utc_now();
        let mut am = widget::ActiveModel::new_record();
        am.created_at = ActiveValue::Set(fixed);
        am.stamp_for_save(true);
        assert_eq!(am.created_at, ActiveValue::Set(fixed));
    }

    #[test]
    fn update_stamp_refreshes_modified_at() {
        let mut am = widget::ActiveModel::new_record();
        am.stamp_for_save(false);
        assert!(matches!(am.modified_at, ActiveValue::Set(Some(_))));
        assert!(matches!(am.created_at, ActiveValue::NotSet));
    }

    #[test]
    fn soft_delete_stamps_deleted_at() {
        let mut am = widget::ActiveModel::new_record();
        am.soft_delete();
        assert!(matches!(am.deleted_at, ActiveValue::Set(Some(_))));
    }

    #[test]
    fn records_with_equal_ids_are_the_same() {
        let a = sample_model();
        let mut b = sample_model();
        assert!(!a.same_record(&b));
        assert_ne!(a.identity_hash(), b.identity_hash());

        b.id = a.id;
        assert!(a.same_record(&b));
        assert_eq!(a.identity_hash(), b.identity_hash());
        assert_eq!(a.identity_hash(), a.id.as_u128());
    }

    #[test]
    fn records_without_ids_are_never_the_same() {
        struct Detached;

        impl RecordIdentity for Detached {
            fn record_id(&self) -> Option<uuid::Uuid> {
                None
            }
            fn record_label(&self) -> &str {
                "Detached"
            }
        }

        assert!(!Detached.same_record(&Detached));
        assert_eq!(Detached.record_repr(), "Detached(id=None)");
    }

    #[test]
    fn repr_shows_id_and_never_fails_when_detached() {
        let model = sample_model();
        assert_eq!(model.record_repr(), format!("Widget(id={})", model.id));
        assert_eq!(record_repr("Widget", None), "Widget(id=None)");
    }
}
