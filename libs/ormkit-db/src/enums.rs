//! Enum column codec.
//!
//! [`EnumCol`] adapts an application enum to a primitive column value.
//! The backing kind is fixed by the enum's [`StoredEnum::Repr`] associated
//! type: `i32` for integer columns, `String` for text columns.
//!
//! The adapter carries no runtime state, so its identity is exactly its type
//! parameter and prepared-statement caches keyed on the column type stay
//! valid across repeated query-plan executions.

use std::fmt;

use sea_orm::sea_query::{ArrayType, ColumnType, Nullable, StringLen, ValueType, ValueTypeErr};
use sea_orm::{ColIdx, DbErr, QueryResult, TryGetError, TryGetable, Value};

use crate::error::{ModelError, Result};

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for String {}
}

/// Primitive backing kind for a stored enum.
///
/// Implemented for `i32` (integer columns) and `String` (text columns);
/// the set is sealed.
///
/// Known limitation of the text backing: schema-diff tooling can mis-detect
/// text-backed enum columns and emit spurious migrations. This is documented
/// behavior, not something this crate papers over; prefer the integer
/// backing where migration diffing matters.
pub trait EnumRepr: sealed::Sealed + Sized + Clone + fmt::Debug + Send + Sync {
    fn into_value(self) -> Value;
    fn from_value(value: Value) -> Option<Self>;
    /// # Errors
    /// Forwards the underlying column read error, including `NULL` reads.
    fn try_get_by<I: ColIdx>(res: &QueryResult, idx: I) -> std::result::Result<Self, TryGetError>;
    fn null_value() -> Value;
    fn array_type() -> ArrayType;
    fn column_type() -> ColumnType;
}

impl EnumRepr for i32 {
    fn into_value(self) -> Value {
        Value::Int(Some(self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(Some(v)) => Some(v),
            _ => None,
        }
    }

    fn try_get_by<I: ColIdx>(res: &QueryResult, idx: I) -> std::result::Result<Self, TryGetError> {
        <Self as TryGetable>::try_get_by(res, idx)
    }

    fn null_value() -> Value {
        Value::Int(None)
    }

    fn array_type() -> ArrayType {
        ArrayType::Int
    }

    fn column_type() -> ColumnType {
        ColumnType::Integer
    }
}

impl EnumRepr for String {
    fn into_value(self) -> Value {
        Value::String(Some(Box::new(self)))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(Some(v)) => Some(*v),
            _ => None,
        }
    }

    fn try_get_by<I: ColIdx>(res: &QueryResult, idx: I) -> std::result::Result<Self, TryGetError> {
        <Self as TryGetable>::try_get_by(res, idx)
    }

    fn null_value() -> Value {
        Value::String(None)
    }

    fn array_type() -> ArrayType {
        ArrayType::String
    }

    fn column_type() -> ColumnType {
        ColumnType::String(StringLen::None)
    }
}

/// Enumeration stored as a primitive column value.
///
/// `from_repr` returns `None` for a primitive with no matching member; the
/// codec turns that into a value-conversion error that propagates to the
/// storage layer. It is never mapped to a default member.
pub trait StoredEnum: Sized + Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Backing primitive: `i32` or `String`.
    type Repr: EnumRepr;

    /// Name used in error messages.
    const NAME: &'static str;

    fn to_repr(self) -> Self::Repr;
    fn from_repr(repr: Self::Repr) -> Option<Self>;
}

/// Column adapter storing `E` as its primitive representation.
///
/// Usable directly as a `DeriveEntityModel` field type, including inside
/// `Option` for nullable columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumCol<E>(pub E);

impl<E: StoredEnum> EnumCol<E> {
    #[must_use]
    pub fn into_inner(self) -> E {
        self.0
    }

    /// Bind-side conversion with null passthrough.
    #[must_use]
    pub fn encode(value: Option<E>) -> Option<E::Repr> {
        value.map(StoredEnum::to_repr)
    }

    /// Result-side conversion with null passthrough.
    ///
    /// # Errors
    /// [`ModelError::UnknownEnumValue`] if the primitive matches no member.
    pub fn decode(raw: Option<E::Repr>) -> Result<Option<E>> {
        match raw {
            None => Ok(None),
            Some(repr) => match E::from_repr(repr.clone()) {
                Some(member) => Ok(Some(member)),
                None => Err(ModelError::UnknownEnumValue {
                    enum_type: E::NAME,
                    value: format!("{repr:?}"),
                }),
            },
        }
    }
}

impl<E: StoredEnum> From<E> for EnumCol<E> {
    fn from(value: E) -> Self {
        Self(value)
    }
}

impl<E: StoredEnum> From<EnumCol<E>> for Value {
    fn from(col: EnumCol<E>) -> Self {
        col.0.to_repr().into_value()
    }
}

impl<E: StoredEnum> TryGetable for EnumCol<E> {
    fn try_get_by<I: ColIdx>(res: &QueryResult, idx: I) -> std::result::Result<Self, TryGetError> {
        let repr = <E::Repr as EnumRepr>::try_get_by(res, idx)?;
        match E::from_repr(repr.clone()) {
            Some(member) => Ok(Self(member)),
            None => Err(TryGetError::DbErr(DbErr::Type(format!(
                "no {} member has value {repr:?}",
                E::NAME
            )))),
        }
    }
}

impl<E: StoredEnum> ValueType for EnumCol<E> {
    fn try_from(v: Value) -> std::result::Result<Self, ValueTypeErr> {
        let repr = <E::Repr as EnumRepr>::from_value(v).ok_or(ValueTypeErr)?;
        E::from_repr(repr).map(Self).ok_or(ValueTypeErr)
    }

    fn type_name() -> String {
        format!("EnumCol<{}>", E::NAME)
    }

    fn array_type() -> ArrayType {
        <E::Repr as EnumRepr>::array_type()
    }

    fn column_type() -> ColumnType {
        <E::Repr as EnumRepr>::column_type()
    }
}

impl<E: StoredEnum> Nullable for EnumCol<E> {
    fn null() -> Value {
        <E::Repr as EnumRepr>::null_value()
    }
}
