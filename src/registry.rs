//! Discriminator registry for polymorphic ("one-of-N") Bot API objects.
//!
//! Every hierarchy owns a [`Registry`] built once behind a `OnceLock`: a
//! table from discriminator value to the constructor of the concrete variant,
//! plus the inverse table (variant → discriminator) used when encoding.
//! After construction a registry is read-only, so lookups need no locking.
//!
//! Decoding never fails on an unregistered discriminator. The object is kept
//! verbatim as an [`UnknownVariant`] so that protocol additions this build
//! does not know about survive a decode/encode round trip.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::codec::json_kind;
use crate::error::CodecError;

/// Value of a hierarchy's discriminator field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Discriminator {
    /// Small integer code. `0` means "none" and is never registered.
    Code(i64),
    /// Literal token such as `"custom_emoji"`.
    Tag(Cow<'static, str>),
}

impl Discriminator {
    /// Read a discriminator out of a raw JSON value.
    ///
    /// Returns `None` for shapes that cannot carry one (null, bool, float,
    /// array, object).
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Code),
            Value::String(s) => Some(Self::Tag(Cow::Owned(s.clone()))),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Code(code) => Value::from(*code),
            Self::Tag(tag) => Value::String(tag.to_string()),
        }
    }
}

impl From<i64> for Discriminator {
    fn from(code: i64) -> Self {
        Self::Code(code)
    }
}

impl From<i32> for Discriminator {
    fn from(code: i32) -> Self {
        Self::Code(i64::from(code))
    }
}

impl From<&'static str> for Discriminator {
    fn from(tag: &'static str) -> Self {
        Self::Tag(Cow::Borrowed(tag))
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Tag(tag) => write!(f, "{tag:?}"),
        }
    }
}

/// An object whose discriminator has no registered variant.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownVariant {
    pub discriminator: Discriminator,
    /// The full original object, discriminator included.
    pub payload: Map<String, Value>,
}

/// Builds the concrete variant from the full JSON object.
pub type Constructor<H> = fn(Value) -> Result<H, CodecError>;

/// Per-hierarchy discriminator table.
pub struct Registry<H> {
    hierarchy: &'static str,
    field: &'static str,
    constructors: HashMap<Discriminator, Constructor<H>>,
    discriminators: HashMap<&'static str, Discriminator>,
}

impl<H> Registry<H> {
    /// Start an empty table for the hierarchy `hierarchy`, whose objects carry
    /// their discriminator in `field`.
    pub fn new(hierarchy: &'static str, field: &'static str) -> Self {
        Self {
            hierarchy,
            field,
            constructors: HashMap::new(),
            discriminators: HashMap::new(),
        }
    }

    /// Register a variant.
    ///
    /// # Panics
    ///
    /// Registration happens once while the static table is built; a reused
    /// discriminator, a reused variant name or the reserved code `0` is a
    /// bug in the table itself.
    pub fn variant(
        mut self,
        name: &'static str,
        discriminator: impl Into<Discriminator>,
        constructor: Constructor<H>,
    ) -> Self {
        let discriminator = discriminator.into();
        assert!(
            discriminator != Discriminator::Code(0),
            "{}: discriminator code 0 is reserved for \"none\"",
            self.hierarchy
        );
        if self
            .constructors
            .insert(discriminator.clone(), constructor)
            .is_some()
        {
            panic!(
                "{}: discriminator {} registered twice",
                self.hierarchy, discriminator
            );
        }
        if self.discriminators.insert(name, discriminator).is_some() {
            panic!("{}: variant {} registered twice", self.hierarchy, name);
        }
        self
    }

    pub fn hierarchy(&self) -> &'static str {
        self.hierarchy
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn constructor(&self, discriminator: &Discriminator) -> Option<Constructor<H>> {
        self.constructors.get(discriminator).copied()
    }

    /// Inverse lookup: the discriminator assigned to a variant name.
    pub fn discriminator_of(&self, variant: &str) -> Option<&Discriminator> {
        self.discriminators.get(variant)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

/// A closed set of variants selected by a discriminator field.
///
/// Implemented by the `hierarchy!` macro; hand implementations are possible
/// but must register every variant they can produce.
pub trait Hierarchy: Sized + 'static {
    fn registry() -> &'static Registry<Self>;

    /// Name of the enum variant currently held.
    fn variant_name(&self) -> &'static str;

    /// Fields of the held variant, without the discriminator.
    fn encode_fields(&self) -> Result<Map<String, Value>, CodecError>;

    fn from_unknown(unknown: UnknownVariant) -> Self;

    fn as_unknown(&self) -> Option<&UnknownVariant>;

    /// Discriminator derived from the held variant.
    fn discriminator(&self) -> Option<Discriminator> {
        match self.as_unknown() {
            Some(unknown) => Some(unknown.discriminator.clone()),
            None => Self::registry()
                .discriminator_of(self.variant_name())
                .cloned(),
        }
    }

    fn is_unknown(&self) -> bool {
        self.as_unknown().is_some()
    }
}

/// Decode a JSON object into the variant its discriminator selects.
pub fn decode<H: Hierarchy>(value: Value) -> Result<H, CodecError> {
    let registry = H::registry();
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(CodecError::malformed(format!(
                "{} must be a JSON object, got {}",
                registry.hierarchy,
                json_kind(&other)
            )));
        }
    };

    let discriminator = match object.get(registry.field) {
        None | Some(Value::Null) => {
            return Err(CodecError::MissingDiscriminator {
                hierarchy: registry.hierarchy.to_string(),
                field: registry.field.to_string(),
            });
        }
        Some(raw) => Discriminator::from_value(raw).ok_or_else(|| {
            CodecError::type_mismatch(format!(
                "discriminator `{}` of {} must be an integer or a string, got {}",
                registry.field,
                registry.hierarchy,
                json_kind(raw)
            ))
        })?,
    };

    match registry.constructor(&discriminator) {
        Some(constructor) => constructor(Value::Object(object)),
        None => {
            debug!(
                hierarchy = registry.hierarchy,
                %discriminator,
                "Unregistered discriminator, keeping raw payload"
            );
            Ok(H::from_unknown(UnknownVariant {
                discriminator,
                payload: object,
            }))
        }
    }
}

/// Encode a variant as a JSON object, discriminator first.
pub fn encode<H: Hierarchy>(value: &H) -> Result<Map<String, Value>, CodecError> {
    if let Some(unknown) = value.as_unknown() {
        return Ok(unknown.payload.clone());
    }

    let registry = H::registry();
    let discriminator = registry
        .discriminator_of(value.variant_name())
        .ok_or_else(|| {
            CodecError::type_mismatch(format!(
                "variant {} of {} has no registered discriminator",
                value.variant_name(),
                registry.hierarchy
            ))
        })?;

    let fields = value.encode_fields()?;
    let mut object = Map::with_capacity(fields.len() + 1);
    object.insert(registry.field.to_string(), discriminator.to_value());
    for (key, field) in fields {
        if key != registry.field {
            object.insert(key, field);
        }
    }
    Ok(object)
}

/// `Serialize` body shared by every hierarchy.
pub fn serialize<H, S>(value: &H, serializer: S) -> Result<S::Ok, S::Error>
where
    H: Hierarchy,
    S: Serializer,
{
    encode(value).map_err(S::Error::custom)?.serialize(serializer)
}

/// `Deserialize` body shared by every hierarchy.
pub fn deserialize<'de, H, D>(deserializer: D) -> Result<H, D::Error>
where
    H: Hierarchy,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    decode(value).map_err(D::Error::custom)
}

/// Display-symbol table for "soft enums".
///
/// Some protocol values are plain strings meant for humans (the dice emoji
/// `"🎲"`), not structural tags. The table maps each known value to its
/// symbol in both directions.
pub struct SymbolTable<E: 'static> {
    name: &'static str,
    entries: &'static [(E, &'static str)],
}

impl<E: Clone + PartialEq + 'static> SymbolTable<E> {
    pub const fn new(name: &'static str, entries: &'static [(E, &'static str)]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn symbol(&self, value: &E) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == value)
            .map(|(_, symbol)| *symbol)
    }

    pub fn lookup(&self, symbol: &str) -> Option<E> {
        self.entries
            .iter()
            .find(|(_, candidate)| *candidate == symbol)
            .map(|(value, _)| value.clone())
    }

    pub fn symbols(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, symbol)| *symbol)
    }
}
