//! The `Storable` capability - which types may be saved

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// A value that can be written to and read back from the store
///
/// Encoding comes from serde. `type_tag` names the type inside every record
/// so a load with the wrong type fails instead of decoding garbage. The tag
/// must stay the same for as long as records of the type are kept around.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct User { name: String, age: u32 }
///
/// impl Storable for User {
///     fn type_tag() -> String {
///         "app::User".into()
///     }
/// }
/// ```
pub trait Storable: Serialize + DeserializeOwned {
    /// Stable name of the stored type
    fn type_tag() -> String;
}

macro_rules! storable_primitive {
    ($($ty:ty => $tag:literal),* $(,)?) => {
        $(
            impl Storable for $ty {
                fn type_tag() -> String {
                    $tag.to_string()
                }
            }
        )*
    };
}

storable_primitive! {
    () => "unit",
    bool => "bool",
    char => "char",
    String => "string",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    f32 => "f32",
    f64 => "f64",
}

impl<T: Storable> Storable for Vec<T> {
    fn type_tag() -> String {
        format!("vec<{}>", T::type_tag())
    }
}

impl<T: Storable> Storable for Option<T> {
    fn type_tag() -> String {
        format!("option<{}>", T::type_tag())
    }
}

// Boxing does not change the encoding
impl<T: Storable> Storable for Box<T> {
    fn type_tag() -> String {
        T::type_tag()
    }
}

impl<K: Storable + Ord, V: Storable> Storable for BTreeMap<K, V> {
    fn type_tag() -> String {
        format!("map<{},{}>", K::type_tag(), V::type_tag())
    }
}

impl<K: Storable + Eq + Hash, V: Storable> Storable for HashMap<K, V> {
    fn type_tag() -> String {
        format!("map<{},{}>", K::type_tag(), V::type_tag())
    }
}

impl<T: Storable + Ord> Storable for BTreeSet<T> {
    fn type_tag() -> String {
        format!("set<{}>", T::type_tag())
    }
}

impl<T: Storable + Eq + Hash> Storable for HashSet<T> {
    fn type_tag() -> String {
        format!("set<{}>", T::type_tag())
    }
}
