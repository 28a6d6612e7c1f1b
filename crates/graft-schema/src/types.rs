use std::fmt;

/// Scalar names every schema understands without registration.
pub const BUILTIN_SCALARS: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

///
/// TypeRef
///
/// Declared value type of a field. Named references may point at records
/// that are not registered yet; they are checked when the field table is built.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeRef {
    List(Box<Self>),
    Named(String),
    NonNull(Box<Self>),
}

impl TypeRef {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wrap in non-null unless already non-null.
    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            Self::NonNull(_) => self,
            other => Self::NonNull(Box::new(other)),
        }
    }

    /// Strip a single outer non-null wrapper.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            Self::NonNull(inner) => *inner,
            other => other,
        }
    }

    /// The named type at the core of any list/non-null wrappers.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.base_name(),
        }
    }

    #[must_use]
    pub fn is_builtin_scalar(&self) -> bool {
        BUILTIN_SCALARS.contains(&self.base_name())
    }

    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::Named(name) => f.write_str(name),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

///
/// GraphValue
///
/// Maps a Rust value type onto its schema type. Decorated records implement
/// this through the attribute macros.
///

pub trait GraphValue {
    fn type_ref() -> TypeRef;
}

macro_rules! impl_scalar {
    ($scalar:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl GraphValue for $ty {
                fn type_ref() -> TypeRef {
                    TypeRef::named($scalar).non_null()
                }
            }
        )+
    };
}

impl_scalar!("Boolean" => bool);
impl_scalar!("Float" => f32, f64);
impl_scalar!("Int" => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_scalar!("String" => String, str, char);

impl<T: GraphValue + ?Sized> GraphValue for &T {
    fn type_ref() -> TypeRef {
        T::type_ref()
    }
}

impl<T: GraphValue + ?Sized> GraphValue for Box<T> {
    fn type_ref() -> TypeRef {
        T::type_ref()
    }
}

impl<T: GraphValue> GraphValue for Option<T> {
    fn type_ref() -> TypeRef {
        T::type_ref().nullable()
    }
}

impl<T: GraphValue> GraphValue for Vec<T> {
    fn type_ref() -> TypeRef {
        TypeRef::list(T::type_ref()).non_null()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_types_map_to_schema_types() {
        assert_eq!(String::type_ref().to_string(), "String!");
        assert_eq!(i32::type_ref().to_string(), "Int!");
        assert_eq!(<Option<f64>>::type_ref().to_string(), "Float");
        assert_eq!(<Vec<Option<bool>>>::type_ref().to_string(), "[Boolean]!");
    }

    #[test]
    fn every_integer_width_is_an_int() {
        for ty in [
            u64::type_ref(),
            usize::type_ref(),
            i128::type_ref(),
            <Option<u128>>::type_ref().non_null(),
        ] {
            assert_eq!(ty, TypeRef::named("Int").non_null());
        }
    }

    #[test]
    fn base_name_sees_through_wrappers() {
        let ty = TypeRef::list(TypeRef::named("Person").non_null()).non_null();

        assert_eq!(ty.base_name(), "Person");
        assert!(!ty.is_builtin_scalar());
        assert!(TypeRef::named("ID").is_builtin_scalar());
    }

    #[test]
    fn non_null_is_not_doubled() {
        let ty = TypeRef::named("Int").non_null().non_null();

        assert_eq!(ty.to_string(), "Int!");
    }
}
