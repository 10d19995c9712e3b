// logic_variant/src/variant.rs

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use logic_ids::ObjectID;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};
use thiserror::Error;

use crate::structs::{Vector3, Vector4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Value carried by a logic socket. Nodes narrow it with the `expect_*` accessors.
#[derive(Clone, Debug, PartialEq)]
pub enum Variant {
    Null,

    Bool(bool),
    Number(Number),
    String(Arc<str>),

    // Scene handle
    ObjectID(ObjectID),

    Vector3(Vector3),
    Vector4(Vector4),

    Array(Vec<Variant>),
    Map(BTreeMap<Arc<str>, Variant>),
}

/// Discriminant of a [`Variant`], used in mismatch reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariantKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Object,
    Vector3,
    Vector4,
    Array,
    Map,
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariantKind::Null => "null",
            VariantKind::Bool => "bool",
            VariantKind::Int => "int",
            VariantKind::Float => "float",
            VariantKind::String => "string",
            VariantKind::Object => "object",
            VariantKind::Vector3 => "vector3",
            VariantKind::Vector4 => "vector4",
            VariantKind::Array => "array",
            VariantKind::Map => "map",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("type mismatch: expected {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: VariantKind,
    pub found: VariantKind,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Null => write!(f, "null"),
            Variant::Bool(v) => write!(f, "{v}"),
            Variant::Number(v) => write!(f, "{v}"),
            Variant::String(v) => write!(f, "{:?}", v.as_ref()),
            Variant::ObjectID(v) => write!(f, "object({v})"),
            Variant::Vector3(v) => write!(f, "{v}"),
            Variant::Vector4(v) => write!(f, "{v}"),
            Variant::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            Variant::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key.as_ref(), value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// -------------------- Constructors --------------------

impl Variant {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    #[inline]
    pub fn string<S: AsRef<str>>(s: S) -> Self {
        Variant::String(Arc::<str>::from(s.as_ref()))
    }

    pub const fn kind(&self) -> VariantKind {
        match self {
            Variant::Null => VariantKind::Null,
            Variant::Bool(_) => VariantKind::Bool,
            Variant::Number(Number::Int(_)) => VariantKind::Int,
            Variant::Number(Number::Float(_)) => VariantKind::Float,
            Variant::String(_) => VariantKind::String,
            Variant::ObjectID(_) => VariantKind::Object,
            Variant::Vector3(_) => VariantKind::Vector3,
            Variant::Vector4(_) => VariantKind::Vector4,
            Variant::Array(_) => VariantKind::Array,
            Variant::Map(_) => VariantKind::Map,
        }
    }
}

// -------------------- Accessors --------------------

impl Variant {
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Variant::Number(Number::Int(v)) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[Variant]> {
        match self {
            Variant::Array(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&BTreeMap<Arc<str>, Variant>> {
        match self {
            Variant::Map(m) => Some(m),
            _ => None,
        }
    }
}

// -------------------- Narrowing --------------------
// Strict accessors for node inputs: anything else is a `TypeMismatch`.

impl Variant {
    #[inline]
    fn mismatch(&self, expected: VariantKind) -> TypeMismatch {
        TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn expect_int(&self) -> Result<i64, TypeMismatch> {
        self.as_int().ok_or_else(|| self.mismatch(VariantKind::Int))
    }

    pub fn expect_array(&self) -> Result<&[Variant], TypeMismatch> {
        self.as_array()
            .ok_or_else(|| self.mismatch(VariantKind::Array))
    }

    /// Object reference. Null, and the nil ID, narrow to `None`.
    pub fn expect_object(&self) -> Result<Option<ObjectID>, TypeMismatch> {
        match *self {
            Variant::Null => Ok(None),
            Variant::ObjectID(id) if id.is_nil() => Ok(None),
            Variant::ObjectID(id) => Ok(Some(id)),
            _ => Err(self.mismatch(VariantKind::Object)),
        }
    }

    /// Vector socket value. A `Vector3` is widened with `w` = 0.
    pub fn expect_vec4(&self) -> Result<Vector4, TypeMismatch> {
        match *self {
            Variant::Vector4(v) => Ok(v),
            Variant::Vector3(v) => Ok(Vector4::from_vec3(v)),
            _ => Err(self.mismatch(VariantKind::Vector4)),
        }
    }
}

// -------------------- From impls --------------------

impl From<bool> for Variant {
    #[inline]
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}
impl From<i32> for Variant {
    #[inline]
    fn from(v: i32) -> Self {
        Variant::Number(Number::Int(v as i64))
    }
}
impl From<i64> for Variant {
    #[inline]
    fn from(v: i64) -> Self {
        Variant::Number(Number::Int(v))
    }
}
impl From<f32> for Variant {
    #[inline]
    fn from(v: f32) -> Self {
        Variant::Number(Number::Float(v as f64))
    }
}
impl From<f64> for Variant {
    #[inline]
    fn from(v: f64) -> Self {
        Variant::Number(Number::Float(v))
    }
}
impl From<&str> for Variant {
    #[inline]
    fn from(v: &str) -> Self {
        Variant::String(Arc::<str>::from(v))
    }
}
impl From<String> for Variant {
    #[inline]
    fn from(v: String) -> Self {
        Variant::String(Arc::<str>::from(v))
    }
}
impl From<ObjectID> for Variant {
    #[inline]
    fn from(v: ObjectID) -> Self {
        Variant::ObjectID(v)
    }
}
impl From<Vector3> for Variant {
    #[inline]
    fn from(v: Vector3) -> Self {
        Variant::Vector3(v)
    }
}
impl From<Vector4> for Variant {
    #[inline]
    fn from(v: Vector4) -> Self {
        Variant::Vector4(v)
    }
}
impl From<Vec<Variant>> for Variant {
    #[inline]
    fn from(v: Vec<Variant>) -> Self {
        Variant::Array(v)
    }
}

// -------------------- JSON conversion --------------------

impl Variant {
    /// Plain JSON mapping. Integers stay `Int`, other numbers become `Float`.
    pub fn from_json_value(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Variant::Null,
            JsonValue::Bool(v) => Variant::Bool(v),
            JsonValue::Number(v) => {
                if let Some(i) = v.as_i64() {
                    Variant::from(i)
                } else if let Some(f) = v.as_f64() {
                    Variant::from(f)
                } else {
                    Variant::Null
                }
            }
            JsonValue::String(v) => Variant::from(v),
            JsonValue::Array(values) => {
                Variant::Array(values.into_iter().map(Variant::from_json_value).collect())
            }
            JsonValue::Object(object) => Variant::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (Arc::<str>::from(k), Variant::from_json_value(v)))
                    .collect::<BTreeMap<Arc<str>, Variant>>(),
            ),
        }
    }

    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Variant::Null => JsonValue::Null,
            Variant::Bool(v) => JsonValue::Bool(*v),
            Variant::Number(Number::Int(v)) => JsonValue::Number(JsonNumber::from(*v)),
            Variant::Number(Number::Float(v)) => float_to_json(*v),
            Variant::String(v) => JsonValue::String(v.as_ref().to_string()),
            Variant::ObjectID(v) => JsonValue::Number(JsonNumber::from(v.as_u64())),
            Variant::Vector3(v) => {
                JsonValue::Array(v.to_array().iter().map(|c| float_to_json(*c as f64)).collect())
            }
            Variant::Vector4(v) => {
                JsonValue::Array(v.to_array().iter().map(|c| float_to_json(*c as f64)).collect())
            }
            Variant::Array(v) => JsonValue::Array(v.iter().map(Variant::to_json_value).collect()),
            Variant::Map(v) => JsonValue::Object(
                v.iter()
                    .map(|(k, v)| (k.as_ref().to_string(), v.to_json_value()))
                    .collect::<JsonMap<String, JsonValue>>(),
            ),
        }
    }
}

fn float_to_json(value: f64) -> JsonValue {
    match JsonNumber::from_f64(value) {
        Some(v) => JsonValue::Number(v),
        None => JsonValue::Null,
    }
}
