// src/aot/contract.rs
//
// Repository contracts
//
// A contract is the explicit method table of a repository trait, written in
// the vocabulary of the query metadata (camelCase method names, simple type
// names). Each repository module exports its own `CONTRACT`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::signature::{simple_type_name, SignatureKey};

/// How a method's query comes to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStyle {
    /// Query inferred from the method name (`findByNameContainingIgnoreCase`)
    Derived,
    /// Query given as a literal SQL string
    Literal(&'static str),
    /// Built-in CRUD operation of the base contract; nothing to generate
    Provided,
}

/// One method of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredMethod {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub query: QueryStyle,
}

impl DeclaredMethod {
    pub const fn derived(name: &'static str, params: &'static [&'static str]) -> Self {
        Self {
            name,
            params,
            query: QueryStyle::Derived,
        }
    }

    pub const fn literal(
        name: &'static str,
        params: &'static [&'static str],
        sql: &'static str,
    ) -> Self {
        Self {
            name,
            params,
            query: QueryStyle::Literal(sql),
        }
    }

    pub const fn provided(name: &'static str, params: &'static [&'static str]) -> Self {
        Self {
            name,
            params,
            query: QueryStyle::Provided,
        }
    }

    pub fn signature_key(&self) -> SignatureKey {
        SignatureKey::new(self.name, self.params.iter())
    }

    /// Same name and same simple parameter types, in order
    pub fn overrides(&self, other: &DeclaredMethod) -> bool {
        self.name == other.name
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(other.params)
                .all(|(a, b)| simple_type_name(a) == simple_type_name(b))
    }
}

/// Methods of the list-returning CRUD base contract every repository extends.
/// Parameter types are the erased ones, so `findById(Long)` does NOT override
/// `findById(Object)`.
pub const LIST_CRUD_CONTRACT: &[DeclaredMethod] = &[
    DeclaredMethod::provided("save", &["Object"]),
    DeclaredMethod::provided("saveAll", &["Iterable"]),
    DeclaredMethod::provided("findById", &["Object"]),
    DeclaredMethod::provided("existsById", &["Object"]),
    DeclaredMethod::provided("findAll", &[]),
    DeclaredMethod::provided("findAllById", &["Iterable"]),
    DeclaredMethod::provided("count", &[]),
    DeclaredMethod::provided("deleteById", &["Object"]),
    DeclaredMethod::provided("delete", &["Object"]),
    DeclaredMethod::provided("deleteAllById", &["Iterable"]),
    DeclaredMethod::provided("deleteAll", &["Iterable"]),
    DeclaredMethod::provided("deleteAll", &[]),
];

/// A named data-access contract and the methods declared directly on it
#[derive(Debug, Clone, Copy)]
pub struct RepositoryContract {
    /// Simple name, used in reports ("CoffeeRepository")
    pub name: &'static str,

    /// Dot-separated identifier; determines where the metadata artifact lives
    pub qualified_name: &'static str,

    /// Base CRUD contract this one extends
    pub base: &'static [DeclaredMethod],

    /// Methods declared directly on this contract, in declaration order
    pub methods: &'static [DeclaredMethod],
}

impl RepositoryContract {
    /// Declared methods that do not override a base CRUD method
    pub fn custom_methods(&self) -> impl Iterator<Item = &'static DeclaredMethod> + '_ {
        self.methods
            .iter()
            .filter(move |method| !self.base.iter().any(|base| method.overrides(base)))
    }

    /// Signature keys of every custom method
    pub fn signature_keys(&self) -> BTreeSet<SignatureKey> {
        self.custom_methods()
            .map(DeclaredMethod::signature_key)
            .collect()
    }

    /// `<root>/a/b/Name.json` for `qualified_name = "a.b.Name"`
    pub fn metadata_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.qualified_name.split('.') {
            path.push(segment);
        }
        path.set_extension("json");
        path
    }
}
