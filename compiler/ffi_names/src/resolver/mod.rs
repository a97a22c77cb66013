//! Memoized name resolution with reverse maps for clash detection.
//!
//! Every kind of identifier has a [`NameTable`]: a forward map from source
//! name to output name, and a reverse multimap from output name back to every
//! source name that produced it. Resolution never reports anything; once all
//! names of a module are resolved, [`NameResolver::clashes`] scans the
//! reverse maps in one pass.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use ffi_ir::ScopedName;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::clash::{ClashReason, KeywordSet, NameClash};
use crate::converter::{ConverterBundle, ConverterChain, ConverterError, NameConverter};
use crate::NameVariant;

/// The kinds of host identifier that are resolved and checked for clashes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum NameKind {
    Module,
    TypeCtor,
    DataCtor,
    Variable,
}

impl NameKind {
    pub fn variant(self) -> NameVariant {
        match self {
            NameKind::Module => NameVariant::ModuleName,
            NameKind::TypeCtor => NameVariant::TypeCtor,
            NameKind::DataCtor => NameVariant::DataCtor,
            NameKind::Variable => NameVariant::Variable,
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NameKind::Module => "module",
            NameKind::TypeCtor => "type ctor",
            NameKind::DataCtor => "data ctor",
            NameKind::Variable => "variable",
        };
        f.write_str(name)
    }
}

/// Whether names of one kind must be unique across the whole module or only
/// within their scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    #[default]
    Flat,
    Scoped,
}

/// Namespace choice per kind. Module names are always flat.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespacePolicy {
    pub variable: Namespace,
    #[serde(rename = "type")]
    pub type_ctor: Namespace,
    #[serde(rename = "ctor")]
    pub data_ctor: Namespace,
}

impl NamespacePolicy {
    pub fn for_kind(&self, kind: NameKind) -> Namespace {
        match kind {
            NameKind::Module => Namespace::Flat,
            NameKind::TypeCtor => self.type_ctor,
            NameKind::DataCtor => self.data_ctor,
            NameKind::Variable => self.variable,
        }
    }
}

/// Explicit output names for one module, keyed by raw source name.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NameOverrides {
    pub variables: BTreeMap<String, String>,
    pub types: BTreeMap<String, String>,
    pub ctors: BTreeMap<String, String>,
}

impl NameOverrides {
    pub fn get(&self, kind: NameKind, raw: &str) -> Option<&str> {
        let map = match kind {
            NameKind::Module => return None,
            NameKind::TypeCtor => &self.types,
            NameKind::DataCtor => &self.ctors,
            NameKind::Variable => &self.variables,
        };
        map.get(raw).map(String::as_str)
    }

    /// Raw names whose override output is empty.
    pub fn empty_outputs(&self) -> impl Iterator<Item = &str> {
        self.variables
            .iter()
            .chain(&self.types)
            .chain(&self.ctors)
            .filter(|(_, out)| out.is_empty())
            .map(|(raw, _)| raw.as_str())
    }
}

/// Forward and reverse maps for one kind of name.
#[derive(Debug)]
struct NameTable {
    kind: NameKind,
    namespace: Namespace,
    forward: FxHashMap<ScopedName, String>,
    /// `(scope, output) -> sources`; the scope is empty in a flat namespace.
    reverse: BTreeMap<(String, String), BTreeSet<ScopedName>>,
}

impl NameTable {
    fn new(kind: NameKind, namespace: Namespace) -> Self {
        NameTable {
            kind,
            namespace,
            forward: FxHashMap::default(),
            reverse: BTreeMap::new(),
        }
    }

    fn resolve(
        &mut self,
        name: &ScopedName,
        convert: impl FnOnce() -> Result<String, ConverterError>,
    ) -> Result<String, ConverterError> {
        if let Some(out) = self.forward.get(name) {
            return Ok(out.clone());
        }

        let out = convert()?;
        trace!(kind = %self.kind, source = %name, output = %out, "resolved name");
        let scope = match self.namespace {
            Namespace::Flat => String::new(),
            Namespace::Scoped => name.scope.clone(),
        };
        self.reverse
            .entry((scope, out.clone()))
            .or_default()
            .insert(name.clone());
        self.forward.insert(name.clone(), out.clone());
        Ok(out)
    }

    fn clashes(&self, module: Option<&str>, keywords: &KeywordSet, out: &mut Vec<NameClash>) {
        for ((_, output), sources) in &self.reverse {
            let mut report = |reason| {
                out.push(NameClash {
                    kind: self.kind,
                    module: module.map(str::to_owned),
                    output: output.clone(),
                    sources: sources.iter().cloned().collect(),
                    reason,
                });
            };
            if sources.len() > 1 {
                report(ClashReason::Duplicate);
            }
            if keywords.contains(output) {
                report(ClashReason::Keyword);
            }
        }
    }
}

/// Name resolution for the types, constructors and variables of one module.
///
/// Owned by a single module's generation pass and dropped afterwards.
#[derive(Debug)]
pub struct NameResolver {
    module: String,
    overrides: NameOverrides,
    type_chain: ConverterChain,
    ctor_chain: ConverterChain,
    var_chain: ConverterChain,
    types: NameTable,
    ctors: NameTable,
    variables: NameTable,
}

impl NameResolver {
    pub fn new(
        module: impl Into<String>,
        converters: &ConverterBundle,
        file_converter: Option<&NameConverter>,
        overrides: NameOverrides,
        namespaces: &NamespacePolicy,
    ) -> Self {
        let table = |kind| NameTable::new(kind, namespaces.for_kind(kind));
        NameResolver {
            module: module.into(),
            overrides,
            type_chain: converters.chain(NameVariant::TypeCtor, file_converter),
            ctor_chain: converters.chain(NameVariant::DataCtor, file_converter),
            var_chain: converters.chain(NameVariant::Variable, file_converter),
            types: table(NameKind::TypeCtor),
            ctors: table(NameKind::DataCtor),
            variables: table(NameKind::Variable),
        }
    }

    /// The resolved name of the module this resolver belongs to.
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn resolve_type(&mut self, name: &ScopedName) -> Result<String, ConverterError> {
        let overridden = self.overrides.get(NameKind::TypeCtor, &name.name);
        let chain = &self.type_chain;
        self.types.resolve(name, || convert(overridden, chain, name))
    }

    pub fn resolve_ctor(&mut self, name: &ScopedName) -> Result<String, ConverterError> {
        let overridden = self.overrides.get(NameKind::DataCtor, &name.name);
        let chain = &self.ctor_chain;
        self.ctors.resolve(name, || convert(overridden, chain, name))
    }

    pub fn resolve_variable(&mut self, name: &ScopedName) -> Result<String, ConverterError> {
        let overridden = self.overrides.get(NameKind::Variable, &name.name);
        let chain = &self.var_chain;
        self.variables.resolve(name, || convert(overridden, chain, name))
    }

    /// Scan every table for clashes, types first.
    pub fn clashes(&self, keywords: &KeywordSet) -> Vec<NameClash> {
        let mut out = Vec::new();
        let module = Some(self.module.as_str());
        self.types.clashes(module, keywords, &mut out);
        self.ctors.clashes(module, keywords, &mut out);
        self.variables.clashes(module, keywords, &mut out);
        out
    }
}

fn convert(
    overridden: Option<&str>,
    chain: &ConverterChain,
    name: &ScopedName,
) -> Result<String, ConverterError> {
    match overridden {
        Some(out) if !out.is_empty() => Ok(out.to_owned()),
        Some(_) => Err(ConverterError::EmptyName {
            raw: name.name.clone(),
        }),
        None => chain.convert(&name.name),
    }
}

/// Module names for a whole run.
///
/// Module names form one global namespace, so this table outlives the
/// per-module resolvers and is scanned once at the end of a run.
#[derive(Debug)]
pub struct ModuleNameTable {
    explicit: BTreeMap<String, String>,
    table: NameTable,
}

impl Default for ModuleNameTable {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl ModuleNameTable {
    /// `explicit` maps a source file to the module name it must get.
    pub fn new(explicit: BTreeMap<String, String>) -> Self {
        ModuleNameTable {
            explicit,
            table: NameTable::new(NameKind::Module, Namespace::Flat),
        }
    }

    /// Resolve the module name of `file`. `raw` is the name derived from the
    /// file path; `chain` is the module converter chain for that file.
    pub fn resolve(
        &mut self,
        file: &str,
        raw: &str,
        chain: &ConverterChain,
    ) -> Result<String, ConverterError> {
        let overridden = self.explicit.get(file).map(String::as_str);
        // Keyed by file so a clash names the files that collide.
        let key = ScopedName::unscoped(file);
        self.table
            .resolve(&key, || convert(overridden, chain, &ScopedName::unscoped(raw)))
    }

    pub fn clashes(&self, keywords: &KeywordSet) -> Vec<NameClash> {
        let mut out = Vec::new();
        self.table.clashes(None, keywords, &mut out);
        out
    }
}
