//! The static command-signature tables ("mappings") and the value model used
//! to match call sites against them.

pub mod template;

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::template::{Template, TemplateError};

/// An already-evaluated call argument. Only two kinds exist; there is no
/// coercion between them.
#[derive(Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Str(String),
}

impl Value {
    /// The single-letter code this value matches in a type signature.
    pub fn type_code(&self) -> TypeCode {
        match self {
            Value::Number(_) => TypeCode::Numeric,
            Value::Str(_) => TypeCode::Text,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `{}` on f64 already renders whole numbers without a decimal point.
            Value::Number(val) => write!(f, "{}", val),
            Value::Str(val) => write!(f, "{}", val),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A single-letter parameter type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCode {
    /// `F`
    Numeric,
    /// `S`
    Text,
}

impl TypeCode {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'F' => Some(TypeCode::Numeric),
            'S' => Some(TypeCode::Text),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            TypeCode::Numeric => 'F',
            TypeCode::Text => 'S',
        }
    }
}

/// Renders a value sequence as a compact type string (e.g. `FFFS`).
pub fn type_string(args: &[Value]) -> String {
    args.iter().map(|arg| arg.type_code().code()).collect()
}

/// The scope a signature belongs to. Only [`Owner::Global`] entries are
/// matched by the resolver; owner-scoped entries require a bound target
/// context supplied elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Owner {
    Global,
    Entity,
}

/// A failure to load or validate the mapping table.
#[derive(Debug)]
pub enum MappingError {
    Json(serde_json::Error),
    /// A `subcommand` pattern that does not match `name(p1;p2;…)CODES`.
    BadPattern { subcommand: String, reason: String },
    /// A `translatable` template with an invalid placeholder.
    BadTemplate {
        subcommand: String,
        source: TemplateError,
    },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::Json(err) => write!(f, "malformed mapping table: {}", err),
            MappingError::BadPattern { subcommand, reason } => {
                write!(f, "bad signature pattern `{}`: {}", subcommand, reason)
            }
            MappingError::BadTemplate { subcommand, source } => {
                write!(f, "bad template for `{}`: {}", subcommand, source)
            }
        }
    }
}

impl From<serde_json::Error> for MappingError {
    fn from(err: serde_json::Error) -> Self {
        MappingError::Json(err)
    }
}

/// A failure to resolve one call site against a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No Global entry carries the call's name.
    UnknownFunction { name: String },
    /// The name matched but no entry fits the argument shape.
    SignatureMismatch {
        name: String,
        expected: Vec<String>,
        found: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnknownFunction { name } => {
                write!(f, "no global command matches `{}`", name)
            }
            ResolveError::SignatureMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "`{}` expects `{}`, got `{}`",
                name,
                expected.join("` or `"),
                found
            ),
        }
    }
}

/// One command signature: a call shape plus its output template.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub owner: Owner,
    pub name: String,
    /// Formal parameter names, informational only.
    pub params: Vec<String>,
    pub types: Vec<TypeCode>,
    pub template: Template,
}

impl Signature {
    /// Parses a `subcommand` call pattern (`name(p1;p2;…)CODES`) and its
    /// `translatable` template into a validated signature.
    pub fn parse(owner: Owner, subcommand: &str, translatable: &str) -> Result<Self, MappingError> {
        let bad = |reason: &str| MappingError::BadPattern {
            subcommand: subcommand.to_string(),
            reason: reason.to_string(),
        };

        let open = subcommand.find('(').ok_or_else(|| bad("missing `(`"))?;
        let close = subcommand.rfind(')').ok_or_else(|| bad("missing `)`"))?;
        if close < open {
            return Err(bad("`)` before `(`"));
        }

        let name = subcommand[..open].trim();
        if name.is_empty() {
            return Err(bad("missing function name"));
        }

        let param_list = &subcommand[open + 1..close];
        let params: Vec<String> = if param_list.is_empty() {
            Vec::new()
        } else {
            param_list.split(';').map(|p| p.trim().to_string()).collect()
        };

        let types = subcommand[close + 1..]
            .chars()
            .map(|c| TypeCode::from_code(c).ok_or_else(|| bad(&format!("unknown type code `{}`", c))))
            .collect::<Result<Vec<_>, _>>()?;

        if types.len() != params.len() {
            return Err(bad("type codes do not match the parameter list"));
        }

        let template = Template::parse(translatable, types.len()).map_err(|source| {
            MappingError::BadTemplate {
                subcommand: subcommand.to_string(),
                source,
            }
        })?;

        Ok(Self {
            owner,
            name: name.to_string(),
            params,
            types,
            template,
        })
    }

    /// Exact-arity, exact-type, in-order argument check. No coercion.
    pub fn matches(&self, args: &[Value]) -> bool {
        self.types.len() == args.len()
            && self
                .types
                .iter()
                .zip(args)
                .all(|(ty, arg)| *ty == arg.type_code())
    }
}

/// All signatures of one mapping version.
#[derive(Debug, Clone)]
pub struct Profile {
    pub signatures: Vec<Signature>,
}

impl Profile {
    /// Finds a Global signature matching `name` and the argument shape
    /// exactly, and substitutes the arguments into its template. Multiple
    /// entries may share a name; the first shape match wins.
    pub fn resolve_global(&self, name: &str, args: &[Value]) -> Result<String, ResolveError> {
        let mut candidates = Vec::new();
        for signature in self
            .signatures
            .iter()
            .filter(|s| s.owner == Owner::Global && s.name == name)
        {
            if signature.matches(args) {
                return Ok(signature.template.substitute(args));
            }
            candidates.push(signature.types.iter().map(TypeCode::code).collect());
        }

        if candidates.is_empty() {
            Err(ResolveError::UnknownFunction {
                name: name.to_string(),
            })
        } else {
            Err(ResolveError::SignatureMismatch {
                name: name.to_string(),
                expected: candidates,
                found: type_string(args),
            })
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    mappings: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    owner: Owner,
    subcommand: String,
    translatable: String,
}

/// The full mapping table: one [`Profile`] per version key. Read-only for the
/// lifetime of a compilation run.
#[derive(Debug, Clone)]
pub struct MappingTable {
    profiles: HashMap<String, Profile>,
}

impl MappingTable {
    /// Loads and validates a table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, MappingError> {
        let raw: HashMap<String, RawProfile> = serde_json::from_str(json)?;

        let mut profiles = HashMap::new();
        for (version, profile) in raw {
            let signatures = profile
                .mappings
                .iter()
                .map(|entry| Signature::parse(entry.owner, &entry.subcommand, &entry.translatable))
                .collect::<Result<Vec<_>, _>>()?;
            profiles.insert(version, Profile { signatures });
        }

        Ok(Self { profiles })
    }

    /// The table shipped with the compiler.
    pub fn bundled() -> Result<Self, MappingError> {
        Self::from_json(include_str!("../mappings.json"))
    }

    pub fn profile(&self, version: &str) -> Option<&Profile> {
        self.profiles.get(version)
    }

    /// Known version keys, sorted.
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        versions.sort_unstable();
        versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raws: &[&str]) -> Vec<Value> {
        raws.iter()
            .map(|raw| match raw.parse::<f64>() {
                Ok(num) => Value::Number(num),
                Err(_) => Value::Str(raw.to_string()),
            })
            .collect()
    }

    #[test]
    fn parses_signature_patterns() {
        let signature = Signature::parse(
            Owner::Global,
            "setblock(x;y;z;block)FFFS",
            "setblock ~%1 ~%2 ~%3 %4",
        )
        .unwrap();
        assert_eq!(signature.name, "setblock");
        assert_eq!(signature.params, vec!["x", "y", "z", "block"]);
        assert_eq!(
            signature.types,
            vec![
                TypeCode::Numeric,
                TypeCode::Numeric,
                TypeCode::Numeric,
                TypeCode::Text
            ]
        );
    }

    #[test]
    fn rejects_malformed_patterns() {
        assert!(Signature::parse(Owner::Global, "setblock", "x").is_err());
        assert!(Signature::parse(Owner::Global, "setblock(x)Q", "%1").is_err());
        assert!(Signature::parse(Owner::Global, "setblock(x;y)F", "%1").is_err());
        // placeholder beyond arity is caught at load time
        assert!(Signature::parse(Owner::Global, "setblock(x)F", "%2").is_err());
    }

    #[test]
    fn exact_shape_matching() {
        let signature =
            Signature::parse(Owner::Global, "setblock(x;y;z;block)FFFS", "%1 %2 %3 %4").unwrap();

        assert!(signature.matches(&args(&["1", "2", "3", "minecraft:air"])));
        // wrong arity
        assert!(!signature.matches(&args(&["1", "2", "3"])));
        assert!(!signature.matches(&args(&["1", "2", "3", "minecraft:air", "5"])));
        // wrong kind at one position
        assert!(!signature.matches(&args(&["1", "2", "stone", "minecraft:air"])));
        assert!(!signature.matches(&args(&["1", "2", "3", "4"])));
    }

    #[test]
    fn resolves_bundled_setblock() {
        let table = MappingTable::bundled().unwrap();
        let profile = table.profile("1.20.1").unwrap();
        let command = profile
            .resolve_global("setblock", &args(&["1", "2", "3", "minecraft:air"]))
            .unwrap();
        assert_eq!(command, "setblock ~1 ~2 ~3 minecraft:air");
    }

    #[test]
    fn unknown_name_vs_shape_mismatch() {
        let table = MappingTable::bundled().unwrap();
        let profile = table.profile("1.20.1").unwrap();

        assert_eq!(
            profile.resolve_global("setblok", &args(&["1"])),
            Err(ResolveError::UnknownFunction {
                name: "setblok".to_string()
            })
        );
        assert_eq!(
            profile.resolve_global("setblock", &args(&["1", "2", "3", "4"])),
            Err(ResolveError::SignatureMismatch {
                name: "setblock".to_string(),
                expected: vec!["FFFS".to_string()],
                found: "FFFF".to_string(),
            })
        );
    }

    #[test]
    fn entity_owned_entries_do_not_resolve() {
        let table = MappingTable::bundled().unwrap();
        let profile = table.profile("1.20.1").unwrap();
        assert_eq!(
            profile.resolve_global("setblock_offset", &args(&["1", "2", "3", "minecraft:air"])),
            Err(ResolveError::UnknownFunction {
                name: "setblock_offset".to_string()
            })
        );
    }

    #[test]
    fn bundled_versions() {
        let table = MappingTable::bundled().unwrap();
        assert_eq!(table.versions(), vec!["1.20.1", "1.20.2"]);
    }
}
