//! Composable code fragments
//!
//! A [CodeFragment] is a sequence of literal text, type references and nested fragments.
//! Paths embedded in a fragment stay substitutable until rendering: [Imports] uses them
//! to emit `use` declarations and shorten the rendered code.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write};

use proc_macro2::TokenStream;

use crate::resolve::CodegenError;
use crate::types::{TypePath, TypeRef};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum CodePart {
    Text(String),
    Path(TypePath),
    Type(TypeRef),
    Fragment(CodeFragment),
}

/// Immutable piece of generated source code
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CodeFragment {
    parts: Vec<CodePart>,
}

impl CodeFragment {
    pub fn builder() -> CodeBuilder {
        CodeBuilder::default()
    }

    /// The empty fragment
    pub fn empty() -> Self {
        Self::default()
    }

    /// Literal code without embedded references
    pub fn of(text: impl Into<String>) -> Self {
        Self::builder().text(text).build()
    }

    /// Explicit generic argument for a function call: `::<T>`
    pub fn turbofish(ty: &TypeRef) -> Self {
        Self::builder().text("::<").type_ref(ty).text(">").build()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| match part {
            CodePart::Text(text) => text.is_empty(),
            CodePart::Fragment(fragment) => fragment.is_empty(),
            CodePart::Path(_) | CodePart::Type(_) => false,
        })
    }

    /// All paths embedded in this fragment, in order of appearance
    pub fn references(&self) -> Vec<&TypePath> {
        let mut paths = Vec::new();
        self.collect_paths(&mut paths);
        paths
    }

    fn collect_paths<'a>(&'a self, paths: &mut Vec<&'a TypePath>) {
        for part in &self.parts {
            match part {
                CodePart::Text(_) => {}
                CodePart::Path(path) => paths.push(path),
                CodePart::Type(ty) => ty.collect_paths(paths),
                CodePart::Fragment(fragment) => fragment.collect_paths(paths),
            }
        }
    }

    fn write_with<W: Write>(&self, out: &mut W, name: &dyn Fn(&TypePath) -> String) -> fmt::Result {
        for part in &self.parts {
            match part {
                CodePart::Text(text) => out.write_str(text)?,
                CodePart::Path(path) => out.write_str(&name(path))?,
                CodePart::Type(ty) => ty.write_with(out, name)?,
                CodePart::Fragment(fragment) => fragment.write_with(out, name)?,
            }
        }
        Ok(())
    }

    /// Tokenize the fully qualified rendering of this fragment
    pub fn to_token_stream(&self) -> Result<TokenStream, CodegenError> {
        let code = self.to_string();
        code.parse::<TokenStream>().map_err(|err| CodegenError::Tokenize {
            message: format!("{err:?}"),
            code,
        })
    }
}

impl fmt::Display for CodeFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, &TypePath::to_string)
    }
}

/// Builder for [CodeFragment]
#[derive(Debug, Default)]
pub struct CodeBuilder {
    parts: Vec<CodePart>,
}

impl CodeBuilder {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(CodePart::Text(text.into()));
        self
    }

    /// Embed a reference to a named item (type, function, module)
    pub fn path(mut self, path: &TypePath) -> Self {
        self.parts.push(CodePart::Path(path.clone()));
        self
    }

    pub fn type_ref(mut self, ty: &TypeRef) -> Self {
        self.parts.push(CodePart::Type(ty.clone()));
        self
    }

    pub fn fragment(mut self, fragment: &CodeFragment) -> Self {
        self.parts.push(CodePart::Fragment(fragment.clone()));
        self
    }

    /// Embed a list of fragments with a separator between them
    pub fn join<'a>(mut self, fragments: impl IntoIterator<Item = &'a CodeFragment>, separator: &str) -> Self {
        for (idx, fragment) in fragments.into_iter().enumerate() {
            if idx > 0 {
                self.parts.push(CodePart::Text(separator.to_string()));
            }
            self.parts.push(CodePart::Fragment(fragment.clone()));
        }
        self
    }

    pub fn build(self) -> CodeFragment {
        CodeFragment { parts: self.parts }
    }
}

/// Import resolution for a set of fragments emitted in the same module
///
/// Each short name is imported at most once: the first path (in sorted order) claims it,
/// other paths sharing the name stay fully qualified. Single-segment paths are never
/// imported and their names are never shadowed.
#[derive(Clone, Debug, Default)]
pub struct Imports {
    by_name: BTreeMap<String, TypePath>,
}

impl Imports {
    pub fn collect<'a>(fragments: impl IntoIterator<Item = &'a CodeFragment>) -> Self {
        let mut reserved = BTreeSet::new();
        let mut candidates = BTreeSet::new();
        for fragment in fragments {
            for path in fragment.references() {
                if path.segments().len() > 1 {
                    candidates.insert(path);
                } else {
                    reserved.insert(path.simple_name());
                }
            }
        }

        let mut by_name = BTreeMap::new();
        for path in candidates {
            if reserved.contains(path.simple_name()) {
                continue;
            }
            by_name
                .entry(path.simple_name().to_string())
                .or_insert_with(|| path.clone());
        }
        Self { by_name }
    }

    /// Name to use for the path in code rendered with these imports
    pub fn name_of(&self, path: &TypePath) -> String {
        match self.by_name.get(path.simple_name()) {
            Some(imported) if imported == path => path.simple_name().to_string(),
            _ => path.to_string(),
        }
    }

    pub fn use_declarations(&self) -> Vec<String> {
        self.by_name.values().map(|path| format!("use {path};")).collect()
    }

    pub fn render(&self, fragment: &CodeFragment) -> String {
        let mut out = String::new();
        // Writing into a String never fails
        let _ = fragment.write_with(&mut out, &|path: &TypePath| self.name_of(path));
        out
    }
}
