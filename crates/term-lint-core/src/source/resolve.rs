//! Resolution of paths written inside a module, such as an impl's self
//! type, to module paths below the crate root.

use std::collections::HashMap;
use syn::{ItemUse, UseTree};

/// Names brought into scope by `use` items, keyed by the declaring module.
///
/// Each name maps to the absolute path it refers to. Glob imports are not
/// tracked.
pub(crate) type Imports = HashMap<Vec<String>, HashMap<String, Vec<String>>>;

/// Records the names imported by a `use` item declared in `module`.
pub(crate) fn add_use(module: &[String], item: &ItemUse, imports: &mut Imports) {
    if item.leading_colon.is_some() {
        return;
    }
    let names = imports.entry(module.to_vec()).or_default();
    let mut prefix = Vec::new();
    flatten_use(module, &item.tree, &mut prefix, names);
}

fn flatten_use(
    module: &[String],
    tree: &UseTree,
    prefix: &mut Vec<String>,
    names: &mut HashMap<String, Vec<String>>,
) {
    match tree {
        UseTree::Path(p) => {
            prefix.push(p.ident.to_string());
            flatten_use(module, &p.tree, prefix, names);
            prefix.pop();
        }
        UseTree::Name(n) => insert_import(module, prefix, &n.ident, &n.ident, names),
        UseTree::Rename(r) => insert_import(module, prefix, &r.ident, &r.rename, names),
        UseTree::Group(g) => {
            for item in &g.items {
                flatten_use(module, item, prefix, names);
            }
        }
        UseTree::Glob(_) => {}
    }
}

fn insert_import(
    module: &[String],
    prefix: &[String],
    ident: &syn::Ident,
    alias: &syn::Ident,
    names: &mut HashMap<String, Vec<String>>,
) {
    let mut full = prefix.to_vec();
    let alias = if ident == "self" {
        // `use a::b::{self}` imports `b`
        match (prefix.last(), alias == "self") {
            (Some(last), true) => last.clone(),
            (Some(_), false) => alias.to_string(),
            (None, _) => return,
        }
    } else {
        full.push(ident.to_string());
        alias.to_string()
    };
    if alias == "_" {
        return;
    }
    if let Some(target) = resolve_relative(module, &full) {
        names.insert(alias, target);
    }
}

/// Resolves `path`, written inside `module`, to a path below the crate root.
///
/// `crate::`, `self::` and `super::` prefixes are honoured. Otherwise the
/// first segment is looked up in the module's imports, then taken as a
/// child of `module`. Returns `None` when `super` climbs above the root.
pub(crate) fn resolve(
    module: &[String],
    path: &[String],
    imports: &Imports,
) -> Option<Vec<String>> {
    let (first, rest) = path.split_first()?;
    if let Some(target) = imports.get(module).and_then(|names| names.get(first)) {
        let mut resolved = target.clone();
        resolved.extend(rest.iter().cloned());
        return Some(resolved);
    }
    resolve_relative(module, path)
}

fn resolve_relative(module: &[String], path: &[String]) -> Option<Vec<String>> {
    let (mut resolved, mut rest) = match path.first().map(String::as_str) {
        Some("crate") => (Vec::new(), &path[1..]),
        Some("self") => (module.to_vec(), &path[1..]),
        _ => (module.to_vec(), path),
    };
    while let Some((first, tail)) = rest.split_first() {
        if first != "super" {
            break;
        }
        resolved.pop()?;
        rest = tail;
    }
    resolved.extend(rest.iter().cloned());
    Some(resolved)
}
