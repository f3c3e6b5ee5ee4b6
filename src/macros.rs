/// Declare a polymorphic Bot API hierarchy.
///
/// ```rust,ignore
/// hierarchy! {
///     /// Type of a message reaction.
///     pub enum ReactionType("reaction type", tag = "type") {
///         Emoji(ReactionTypeEmoji) = "emoji",
///         CustomEmoji(ReactionTypeCustomEmoji) = "custom_emoji",
///     }
/// }
/// ```
///
/// Expands to the enum (with an extra `Unknown(UnknownVariant)` variant), its
/// [`Hierarchy`](crate::registry::Hierarchy) impl backed by a lazily built
/// registry, registry-driven `Serialize`/`Deserialize`, and a `From` impl per
/// variant payload. Payload types must be distinct.
macro_rules! hierarchy {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($label:literal, tag = $field:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($inner:ty) = $disc:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($inner),
            )+
            /// Discriminator not known to this build; the raw object is kept.
            Unknown($crate::registry::UnknownVariant),
        }

        impl $crate::registry::Hierarchy for $name {
            fn registry() -> &'static $crate::registry::Registry<Self> {
                static REGISTRY: ::std::sync::OnceLock<$crate::registry::Registry<$name>> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    $crate::registry::Registry::new($label, $field)
                        $(
                            .variant(stringify!($variant), $disc, |value| {
                                $crate::codec::decode::<$inner>(value).map($name::$variant)
                            })
                        )+
                })
            }

            fn variant_name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )+
                    Self::Unknown(_) => "Unknown",
                }
            }

            fn encode_fields(
                &self,
            ) -> ::std::result::Result<
                ::serde_json::Map<::std::string::String, ::serde_json::Value>,
                $crate::error::CodecError,
            > {
                match self {
                    $( Self::$variant(inner) => $crate::codec::encode(inner), )+
                    Self::Unknown(unknown) => Ok(unknown.payload.clone()),
                }
            }

            fn from_unknown(unknown: $crate::registry::UnknownVariant) -> Self {
                Self::Unknown(unknown)
            }

            fn as_unknown(&self) -> ::std::option::Option<&$crate::registry::UnknownVariant> {
                match self {
                    Self::Unknown(unknown) => Some(unknown),
                    _ => None,
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::registry::serialize(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::registry::deserialize(deserializer)
            }
        }

        $(
            impl ::std::convert::From<$inner> for $name {
                fn from(value: $inner) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}
