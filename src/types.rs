//! Semantic type model and the type wrapping utility
//!
//! Generated code never refers to types through raw strings: a [TypeRef] keeps every
//! [TypePath] it mentions, so that the emitting layer can later decide how each path is
//! written (fully qualified or through an import).

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::resolve::CodegenError;

/// Path to a named item, such as `::std::collections::HashSet` or `crate::AppComponent`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePath {
    global: bool,
    segments: Vec<String>,
}

/// Identifies the generated struct that will contain an expression
pub type ClassName = TypePath;

impl TypePath {
    /// Build a path from its `::`-separated text form.
    ///
    /// A leading `::` marks an absolute path.
    pub fn new(path: &str) -> Self {
        let (global, rest) = match path.trim().strip_prefix("::") {
            Some(rest) => (true, rest),
            None => (false, path.trim()),
        };
        Self::from_segments(global, rest.split("::"))
    }

    pub fn from_segments<I, S>(global: bool, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { global, segments }
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment of the path, used as the short name once imported
    pub fn simple_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Path to an item nested inside this one
    pub fn child(&self, name: &str) -> Self {
        let mut child = self.clone();
        child.segments.push(name.to_string());
        child
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            f.write_str("::")?;
        }
        f.write_str(&self.segments.join("::"))
    }
}

/// A possibly generic type, as written in the generated code
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Named type with its generic arguments: `HashSet<String>`
    Path { path: TypePath, args: Vec<TypeRef> },
    /// Tuple type, the empty tuple being the unit type
    Tuple(Vec<TypeRef>),
    /// Trait object with a single trait bound: `dyn Logger`
    TraitObject { path: TypePath, args: Vec<TypeRef> },
}

impl TypeRef {
    /// Non-generic named type
    pub fn named(path: &str) -> Self {
        Self::Path {
            path: TypePath::new(path),
            args: Vec::new(),
        }
    }

    pub fn generic(path: TypePath, args: impl IntoIterator<Item = TypeRef>) -> Self {
        Self::Path {
            path,
            args: args.into_iter().collect(),
        }
    }

    pub fn dyn_trait(path: &str) -> Self {
        Self::TraitObject {
            path: TypePath::new(path),
            args: Vec::new(),
        }
    }

    pub fn unit() -> Self {
        Self::Tuple(Vec::new())
    }

    /// Path of the named type or trait, if any
    pub fn path(&self) -> Option<&TypePath> {
        match self {
            Self::Path { path, .. } | Self::TraitObject { path, .. } => Some(path),
            Self::Tuple(_) => None,
        }
    }

    /// Generic arguments, or tuple elements
    pub fn args(&self) -> &[TypeRef] {
        match self {
            Self::Path { args, .. } | Self::TraitObject { args, .. } => args,
            Self::Tuple(elements) => elements,
        }
    }

    /// Collect all paths referenced by this type, including generic arguments
    pub fn collect_paths<'a>(&'a self, paths: &mut Vec<&'a TypePath>) {
        if let Some(path) = self.path() {
            paths.push(path);
        }
        for arg in self.args() {
            arg.collect_paths(paths);
        }
    }

    /// Parse the rendered type back with `syn`
    pub fn to_syn_type(&self) -> Result<syn::Type, CodegenError> {
        let ty = self.to_string();
        syn::parse_str(&ty).map_err(|err| CodegenError::InvalidType {
            ty,
            reason: err.to_string(),
        })
    }

    /// Write the type, using the naming function for all embedded paths
    pub(crate) fn write_with<W: Write>(
        &self,
        out: &mut W,
        name: &dyn Fn(&TypePath) -> String,
    ) -> fmt::Result {
        match self {
            Self::Path { path, args } => {
                out.write_str(&name(path))?;
                write_args(out, args, name)
            }
            Self::TraitObject { path, args } => {
                out.write_str("dyn ")?;
                out.write_str(&name(path))?;
                write_args(out, args, name)
            }
            Self::Tuple(elements) => {
                out.write_char('(')?;
                for (idx, element) in elements.iter().enumerate() {
                    if idx > 0 {
                        out.write_str(", ")?;
                    }
                    element.write_with(out, name)?;
                }
                if elements.len() == 1 {
                    out.write_char(',')?;
                }
                out.write_char(')')
            }
        }
    }
}

fn write_args<W: Write>(
    out: &mut W,
    args: &[TypeRef],
    name: &dyn Fn(&TypePath) -> String,
) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    out.write_char('<')?;
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            out.write_str(", ")?;
        }
        arg.write_with(out, name)?;
    }
    out.write_char('>')
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, &TypePath::to_string)
    }
}

impl FromStr for TypeRef {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| CodegenError::InvalidType {
            ty: s.to_string(),
            reason,
        };
        let ty: syn::Type = syn::parse_str(s).map_err(|err| invalid(err.to_string()))?;
        convert_type(&ty).map_err(invalid)
    }
}

fn convert_type(ty: &syn::Type) -> Result<TypeRef, String> {
    match ty {
        syn::Type::Path(ty) if ty.qself.is_none() => {
            let (path, args) = convert_path(&ty.path)?;
            Ok(TypeRef::Path { path, args })
        }
        syn::Type::Tuple(tuple) => tuple
            .elems
            .iter()
            .map(convert_type)
            .collect::<Result<_, _>>()
            .map(TypeRef::Tuple),
        syn::Type::Paren(paren) => convert_type(&paren.elem),
        syn::Type::Group(group) => convert_type(&group.elem),
        syn::Type::TraitObject(object) => {
            let mut bounds = object.bounds.iter();
            match (bounds.next(), bounds.next()) {
                (Some(syn::TypeParamBound::Trait(bound)), None) => {
                    let (path, args) = convert_path(&bound.path)?;
                    Ok(TypeRef::TraitObject { path, args })
                }
                _ => Err("trait objects must have exactly one trait bound".to_string()),
            }
        }
        _ => Err("only paths, tuples and trait objects are supported".to_string()),
    }
}

fn convert_path(path: &syn::Path) -> Result<(TypePath, Vec<TypeRef>), String> {
    let last = path.segments.len().saturating_sub(1);
    let mut args = Vec::new();
    for (idx, segment) in path.segments.iter().enumerate() {
        match &segment.arguments {
            syn::PathArguments::None => {}
            syn::PathArguments::AngleBracketed(generics) if idx == last => {
                for arg in &generics.args {
                    match arg {
                        syn::GenericArgument::Type(ty) => args.push(convert_type(ty)?),
                        _ => return Err("only type arguments are supported".to_string()),
                    }
                }
            }
            _ => {
                return Err(format!(
                    "unsupported arguments on path segment `{}`",
                    segment.ident
                ))
            }
        }
    }
    let segments = path.segments.iter().map(|segment| segment.ident.to_string());
    let type_path = TypePath::from_segments(path.leading_colon.is_some(), segments);
    Ok((type_path, args))
}

/// Compute wrapped types such as `Ready<HashSet<String>>`
///
/// Implementations must be pure: they are shared by all bindings generated in parallel.
pub trait TypeWrapper: Send + Sync {
    /// Wrap the inner type as the single generic argument of the wrapper type
    fn wrap(&self, inner: &TypeRef, wrapper: &TypePath) -> TypeRef;

    /// Extract the inner type if the type is an application of the wrapper
    fn unwrap<'t>(&self, ty: &'t TypeRef, wrapper: &TypePath) -> Option<&'t TypeRef> {
        match ty {
            TypeRef::Path { path, args } if path == wrapper && args.len() == 1 => args.first(),
            _ => None,
        }
    }
}

/// Default [TypeWrapper]
#[derive(Clone, Copy, Debug, Default)]
pub struct Types;

impl TypeWrapper for Types {
    fn wrap(&self, inner: &TypeRef, wrapper: &TypePath) -> TypeRef {
        TypeRef::generic(wrapper.clone(), [inner.clone()])
    }
}
