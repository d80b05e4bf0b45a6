//! Named, typed slots: model fields and method parameters.

use crate::TypeDesc;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
    pub ty: TypeDesc,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}
