//! Request kinds: how a dependent consumes a bound value

use std::fmt;

use crate::resolve::CodegenError;

/// All the ways a dependency can be requested
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestKind {
    /// The bound value itself: `T`
    Instance,
    /// A handle producing a value on each call
    Provider,
    /// A memoizing handle computing the value on first use
    Lazy,
    ProviderOfLazy,
    /// Injection of the fields of an existing instance
    MembersInjection,
    Producer,
    Produced,
    /// An asynchronous handle completing with the value
    Future,
}

impl RequestKind {
    pub const ALL: [RequestKind; 8] = [
        RequestKind::Instance,
        RequestKind::Provider,
        RequestKind::Lazy,
        RequestKind::ProviderOfLazy,
        RequestKind::MembersInjection,
        RequestKind::Producer,
        RequestKind::Produced,
        RequestKind::Future,
    ];

    /// Whether the request is fulfilled from the instance expression alone
    pub fn is_simple(self) -> bool {
        SimpleRequestKind::try_from(self).is_ok()
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestKind::Instance => "instance",
            RequestKind::Provider => "provider",
            RequestKind::Lazy => "lazy",
            RequestKind::ProviderOfLazy => "provider of lazy",
            RequestKind::MembersInjection => "members injection",
            RequestKind::Producer => "producer",
            RequestKind::Produced => "produced",
            RequestKind::Future => "future",
        };
        f.write_str(name)
    }
}

/// The request kinds reduced to the instance or an immediately completed handle of it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimpleRequestKind {
    Instance,
    Future,
}

impl TryFrom<RequestKind> for SimpleRequestKind {
    type Error = CodegenError;

    fn try_from(kind: RequestKind) -> Result<Self, Self::Error> {
        match kind {
            RequestKind::Instance => Ok(SimpleRequestKind::Instance),
            RequestKind::Future => Ok(SimpleRequestKind::Future),
            RequestKind::Provider
            | RequestKind::Lazy
            | RequestKind::ProviderOfLazy
            | RequestKind::MembersInjection
            | RequestKind::Producer
            | RequestKind::Produced => Err(CodegenError::UnsupportedRequestKind(kind)),
        }
    }
}

impl From<SimpleRequestKind> for RequestKind {
    fn from(kind: SimpleRequestKind) -> Self {
        match kind {
            SimpleRequestKind::Instance => RequestKind::Instance,
            SimpleRequestKind::Future => RequestKind::Future,
        }
    }
}

impl fmt::Display for SimpleRequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        RequestKind::from(*self).fmt(f)
    }
}
