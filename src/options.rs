//! Code generation settings

use once_cell::sync::Lazy;

use crate::types::TypePath;

static STD_ASYNC_HANDLE: Lazy<AsyncHandle> = Lazy::new(|| {
    AsyncHandle::new(
        TypePath::new("::std::future::Ready"),
        TypePath::new("::std::future::ready"),
    )
});

static FUTURES_ASYNC_HANDLE: Lazy<AsyncHandle> = Lazy::new(|| {
    AsyncHandle::new(
        TypePath::new("::futures::future::Ready"),
        TypePath::new("::futures::future::ready"),
    )
});

/// Asynchronous handle type used to fulfill future requests
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsyncHandle {
    handle_type: TypePath,
    immediate: TypePath,
}

impl AsyncHandle {
    /// Custom handle: the generic handle type and the function building a completed handle
    pub fn new(handle_type: TypePath, immediate: TypePath) -> Self {
        Self {
            handle_type,
            immediate,
        }
    }

    /// `std::future::Ready`, completed with `std::future::ready`
    pub fn std() -> Self {
        STD_ASYNC_HANDLE.clone()
    }

    /// `futures::future::Ready`, completed with `futures::future::ready`
    pub fn futures() -> Self {
        FUTURES_ASYNC_HANDLE.clone()
    }

    pub fn handle_type(&self) -> &TypePath {
        &self.handle_type
    }

    pub fn immediate(&self) -> &TypePath {
        &self.immediate
    }
}

impl Default for AsyncHandle {
    fn default() -> Self {
        Self::std()
    }
}

/// When to annotate the immediately completed handle with an explicit type parameter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeParameterPolicy {
    /// Only when the instance expression asks for it
    #[default]
    FromStrategy,
    /// Always, using the type of the instance expression
    Always,
}

/// Settings shared by all binding expressions of a generation run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodegenOptions {
    async_handle: AsyncHandle,
    type_parameters: TypeParameterPolicy,
}

impl CodegenOptions {
    pub fn with_async_handle(mut self, async_handle: AsyncHandle) -> Self {
        self.async_handle = async_handle;
        self
    }

    pub fn with_type_parameters(mut self, policy: TypeParameterPolicy) -> Self {
        self.type_parameters = policy;
        self
    }

    pub fn async_handle(&self) -> &AsyncHandle {
        &self.async_handle
    }

    pub fn type_parameters(&self) -> TypeParameterPolicy {
        self.type_parameters
    }
}
