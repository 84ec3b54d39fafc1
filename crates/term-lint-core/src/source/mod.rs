//! Discovery of declared types from a crate's source tree.
//!
//! Reads the `.rs` files under a source root with `syn` and reports, per
//! namespace (module path), the structs, enums, unions and traits declared
//! in it and in its nested modules. Only names and exemption markers are
//! extracted; bodies are never inspected.
//!
//! Declared members of a type:
//!
//! - methods: functions of inherent `impl` blocks anywhere in the crate
//!   whose self type resolves to the type; for traits, the trait's own
//!   functions
//! - fields: named struct and union fields, enum variants, and associated
//!   constants (of inherent impls, or of the trait itself)
//!
//! Methods coming from trait implementations are named by the trait, not
//! by the type, and are not reported.
//!
//! Files under `bin/`, and `main.rs` next to a `lib.rs`, belong to other
//! crate targets and are skipped.

mod exempt;
mod module_path;
mod resolve;

use crate::config::SourceConfig;
use crate::discovery::{
    DeclaredMember, DeclaredType, Discovery, DiscoveryError, ScanHandle, TypeInfo,
};

use exempt::{find_ignore_comment, has_cfg_test, has_ignore_attr, start_line};
use module_path::{is_separate_target, is_test_file, module_path_for, parse_namespace, qualify};
use resolve::{add_use, resolve, Imports};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use syn::{Attribute, Ident, ImplItem, Item, TraitItem};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// [`Discovery`] over the Rust sources of one crate.
#[derive(Debug, Clone)]
pub struct SourceDiscovery {
    root: PathBuf,
    crate_name: Option<String>,
    exclude: Vec<String>,
    include_tests: bool,
    exempt: Vec<String>,
}

impl SourceDiscovery {
    /// Creates a discovery over a source root (usually `<crate>/src`).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            crate_name: None,
            exclude: Vec::new(),
            include_tests: false,
            exempt: Vec::new(),
        }
    }

    /// Creates a discovery for the crate being built or tested, using
    /// `CARGO_MANIFEST_DIR` and `CARGO_PKG_NAME`.
    ///
    /// Falls back to `./src` when not run under cargo.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn from_env() -> Result<Self, DiscoveryError> {
        let manifest_dir = match std::env::var_os("CARGO_MANIFEST_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };
        let crate_name = std::env::var("CARGO_PKG_NAME").ok();
        Ok(Self::from_config(
            &manifest_dir,
            crate_name.as_deref(),
            &SourceConfig::default(),
        ))
    }

    /// Creates a discovery from the `[source]` section of a config file.
    ///
    /// A relative `root` is resolved against `manifest_dir`.
    #[must_use]
    pub fn from_config(
        manifest_dir: &Path,
        crate_name: Option<&str>,
        config: &SourceConfig,
    ) -> Self {
        let root = if config.root.is_absolute() {
            config.root.clone()
        } else {
            manifest_dir.join(&config.root)
        };

        let mut discovery = Self::new(root)
            .excludes(config.exclude.iter().cloned())
            .include_tests(config.include_tests)
            .exempts(config.exempt.iter().cloned());
        if let Some(name) = crate_name {
            discovery = discovery.crate_name(name);
        }
        discovery
    }

    /// Sets the crate name accepted as a namespace prefix.
    #[must_use]
    pub fn crate_name(mut self, name: impl Into<String>) -> Self {
        self.crate_name = Some(name.into());
        self
    }

    /// Adds an exclude glob pattern, matched against file paths.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets whether test modules and test files are scanned (default: false).
    #[must_use]
    pub fn include_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    /// Marks a qualified type or member path as exempt.
    #[must_use]
    pub fn exempt(mut self, path: impl Into<String>) -> Self {
        self.exempt.push(path.into());
        self
    }

    /// Marks multiple qualified paths as exempt.
    #[must_use]
    pub fn exempts<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Returns the source root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds and parses every library source file.
    ///
    /// The whole crate is parsed, since inherent impls for a type may live
    /// in any module.
    fn parse_files(&self) -> Result<Vec<ParsedFile>, DiscoveryError> {
        if !self.root.is_dir() {
            return Err(DiscoveryError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("source root {} is not a directory", self.root.display()),
            )));
        }

        let patterns = self
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let has_lib = self.root.join("lib.rs").is_file();
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| DiscoveryError::Io(e.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |e| e != "rs") {
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            if patterns
                .iter()
                .any(|p| p.matches_path(relative) || p.matches_path(path))
            {
                debug!("Excluding: {}", path.display());
                continue;
            }
            if is_separate_target(relative, has_lib) {
                debug!("Skipping other crate target: {}", path.display());
                continue;
            }
            if !self.include_tests && is_test_file(relative) {
                debug!("Skipping test file: {}", path.display());
                continue;
            }

            let module = module_path_for(relative);

            let content = std::fs::read_to_string(path)?;
            let ast = syn::parse_file(&content).map_err(|e| DiscoveryError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            files.push(ParsedFile {
                path: path.to_path_buf(),
                module,
                content,
                ast,
            });
        }

        if !self.include_tests {
            let test_modules = collect_test_modules(&files);
            files.retain(|f| !test_modules.iter().any(|m| f.module.starts_with(m)));
        }

        Ok(files)
    }

    /// Normalizes the exempt list to `crate::...` paths.
    fn exempt_paths(&self) -> HashSet<String> {
        self.exempt
            .iter()
            .filter_map(|raw| match parse_namespace(raw, self.crate_name.as_deref()) {
                Ok(segments) => match segments.split_last() {
                    Some((name, module)) => Some(qualify(module, name)),
                    None => {
                        warn!("Ignoring exempt entry without a name: {}", raw);
                        None
                    }
                },
                Err(e) => {
                    warn!("Ignoring exempt entry: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl Discovery for SourceDiscovery {
    fn scan(&self, namespace: &str) -> Result<Box<dyn ScanHandle + '_>, DiscoveryError> {
        let namespace_path = parse_namespace(namespace, self.crate_name.as_deref())?;
        let files = self.parse_files()?;

        let mut types = Vec::new();
        let mut imports = Imports::new();
        for file in &files {
            walk_items(
                &file.ast.items,
                &file.module,
                self.include_tests,
                &mut |module, item| {
                    if let Item::Use(item_use) = item {
                        add_use(module, item_use, &mut imports);
                        return;
                    }
                    if !module.starts_with(&namespace_path) {
                        return;
                    }
                    if let Some((ident, _)) = type_decl(item) {
                        let name = ident.to_string();
                        let qualified = qualify(module, &name);
                        types.push(TypeInfo::new(name, qualified).with_origin(&file.path));
                    }
                },
            );
        }

        debug!(
            "Scanned {} file(s) under {}: {} type(s)",
            files.len(),
            namespace,
            types.len()
        );

        Ok(Box::new(SourceScan {
            namespace: namespace.to_string(),
            files,
            types,
            exempt: self.exempt_paths(),
            imports,
            include_tests: self.include_tests,
        }))
    }
}

/// A parsed source file and the module it defines.
struct ParsedFile {
    path: PathBuf,
    module: Vec<String>,
    content: String,
    ast: syn::File,
}

/// Open scan over one namespace; holds the parsed files until dropped.
struct SourceScan {
    namespace: String,
    files: Vec<ParsedFile>,
    types: Vec<TypeInfo>,
    exempt: HashSet<String>,
    imports: Imports,
    include_tests: bool,
}

impl SourceScan {
    fn is_marked(
        &self,
        file: &ParsedFile,
        attrs: &[Attribute],
        ident: &Ident,
        qualified: &str,
    ) -> bool {
        if has_ignore_attr(attrs) || self.exempt.contains(qualified) {
            return true;
        }
        let name_line = ident.span().start().line;
        let first_line = start_line(attrs, name_line);
        match find_ignore_comment(&file.content, first_line, name_line) {
            Some(directive) => {
                debug!(
                    "Ignore directive for {} (reason: {})",
                    qualified,
                    directive.reason.as_deref().unwrap_or("none given")
                );
                true
            }
            None => false,
        }
    }

    fn member(
        &self,
        file: &ParsedFile,
        attrs: &[Attribute],
        ident: &Ident,
        owner: &str,
        owner_block_exempt: bool,
    ) -> DeclaredMember {
        let name = ident.to_string();
        let qualified = format!("{owner}::{name}");
        if owner_block_exempt || self.is_marked(file, attrs, ident, &qualified) {
            DeclaredMember::exempt(name)
        } else {
            DeclaredMember::new(name)
        }
    }

    /// Collects the declared surface of a type item.
    fn build(
        &self,
        file: &ParsedFile,
        module: &[String],
        item: &Item,
        qualified: &str,
    ) -> Option<DeclaredType> {
        let (ident, attrs) = type_decl(item)?;
        let name = ident.to_string();

        let mut methods = Vec::new();
        let mut fields = Vec::new();
        match item {
            Item::Struct(s) => {
                for field in &s.fields {
                    if let Some(field_ident) = &field.ident {
                        fields.push(self.member(file, &field.attrs, field_ident, qualified, false));
                    }
                }
            }
            Item::Union(u) => {
                for field in &u.fields.named {
                    if let Some(field_ident) = &field.ident {
                        fields.push(self.member(file, &field.attrs, field_ident, qualified, false));
                    }
                }
            }
            Item::Enum(e) => {
                for variant in &e.variants {
                    fields.push(self.member(file, &variant.attrs, &variant.ident, qualified, false));
                }
            }
            Item::Trait(t) => {
                for trait_item in &t.items {
                    match trait_item {
                        TraitItem::Fn(f) => {
                            methods.push(self.member(file, &f.attrs, &f.sig.ident, qualified, false));
                        }
                        TraitItem::Const(c) => {
                            fields.push(self.member(file, &c.attrs, &c.ident, qualified, false));
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }

        let mut type_path = module.to_vec();
        type_path.push(name.clone());

        // Inherent impls may live in any module of the crate.
        for impl_file in &self.files {
            walk_items(
                &impl_file.ast.items,
                &impl_file.module,
                self.include_tests,
                &mut |impl_module, impl_item| {
                    let Item::Impl(block) = impl_item else {
                        return;
                    };
                    if block.trait_.is_some() {
                        return;
                    }
                    let resolved = self_type_path(&block.self_ty)
                        .and_then(|path| resolve(impl_module, &path, &self.imports));
                    if resolved.as_ref() != Some(&type_path) {
                        return;
                    }
                    let block_exempt = has_ignore_attr(&block.attrs);
                    for impl_member in &block.items {
                        match impl_member {
                            ImplItem::Fn(f) => methods.push(self.member(
                                impl_file,
                                &f.attrs,
                                &f.sig.ident,
                                qualified,
                                block_exempt,
                            )),
                            ImplItem::Const(c) => fields.push(self.member(
                                impl_file,
                                &c.attrs,
                                &c.ident,
                                qualified,
                                block_exempt,
                            )),
                            _ => {}
                        }
                    }
                },
            );
        }

        let mut ty = DeclaredType::new(name)
            .qualified(qualified)
            .exempted(self.is_marked(file, attrs, ident, qualified));
        for method in methods {
            ty = ty.with_method(method);
        }
        for field in fields {
            ty = ty.with_field(field);
        }
        Some(ty)
    }
}

impl ScanHandle for SourceScan {
    fn types(&self) -> &[TypeInfo] {
        &self.types
    }

    fn load(&self, info: &TypeInfo) -> Result<DeclaredType, DiscoveryError> {
        let mut loaded = None;
        for file in &self.files {
            walk_items(
                &file.ast.items,
                &file.module,
                self.include_tests,
                &mut |module, item| {
                    if loaded.is_some() {
                        return;
                    }
                    let Some((ident, _)) = type_decl(item) else {
                        return;
                    };
                    let qualified = qualify(module, &ident.to_string());
                    if qualified == info.qualified_name() {
                        loaded = self.build(file, module, item, &qualified);
                    }
                },
            );
            if loaded.is_some() {
                break;
            }
        }

        loaded.ok_or_else(|| DiscoveryError::Load {
            name: info.qualified_name().to_string(),
            message: format!("no declaration found under namespace {}", self.namespace),
        })
    }
}

impl Drop for SourceScan {
    fn drop(&mut self) {
        debug!(
            "Released scan of {} ({} file(s))",
            self.namespace,
            self.files.len()
        );
    }
}

/// Visits every item, descending into inline modules.
///
/// `#[cfg(test)]` modules are skipped unless `include_tests` is set.
fn walk_items<'a>(
    items: &'a [Item],
    module: &[String],
    include_tests: bool,
    visit: &mut dyn FnMut(&[String], &'a Item),
) {
    for item in items {
        if let Item::Mod(m) = item {
            if !include_tests && has_cfg_test(&m.attrs) {
                continue;
            }
            if let Some((_, inner)) = &m.content {
                let mut nested = module.to_vec();
                nested.push(m.ident.to_string());
                walk_items(inner, &nested, include_tests, visit);
            }
            continue;
        }
        visit(module, item);
    }
}

/// Module paths declared with `#[cfg(test)] mod x;` in the parsed files.
fn collect_test_modules(files: &[ParsedFile]) -> Vec<Vec<String>> {
    let mut test_modules = Vec::new();
    for file in files {
        collect_test_mods(&file.ast.items, &file.module, &mut test_modules);
    }
    test_modules
}

fn collect_test_mods(items: &[Item], module: &[String], out: &mut Vec<Vec<String>>) {
    for item in items {
        let Item::Mod(m) = item else {
            continue;
        };
        let mut nested = module.to_vec();
        nested.push(m.ident.to_string());
        if has_cfg_test(&m.attrs) {
            out.push(nested);
        } else if let Some((_, inner)) = &m.content {
            collect_test_mods(inner, &nested, out);
        }
    }
}

/// Returns the name and attributes of a type declaration item.
fn type_decl(item: &Item) -> Option<(&Ident, &[Attribute])> {
    match item {
        Item::Struct(s) => Some((&s.ident, &s.attrs)),
        Item::Enum(e) => Some((&e.ident, &e.attrs)),
        Item::Union(u) => Some((&u.ident, &u.attrs)),
        Item::Trait(t) => Some((&t.ident, &t.attrs)),
        _ => None,
    }
}

/// Path segments of an impl's self type, generics dropped
/// (`super::Foo` for `super::Foo<T>`).
fn self_type_path(ty: &syn::Type) -> Option<Vec<String>> {
    match ty {
        syn::Type::Path(p) if p.qself.is_none() && p.path.leading_colon.is_none() => Some(
            p.path
                .segments
                .iter()
                .map(|s| s.ident.to_string())
                .collect(),
        ),
        syn::Type::Group(g) => self_type_path(&g.elem),
        syn::Type::Paren(p) => self_type_path(&p.elem),
        _ => None,
    }
}
