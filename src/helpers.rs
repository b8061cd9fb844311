//! Instance expressions for each category of binding

use once_cell::sync::Lazy;

use crate::binding::{Binding, BindingKind};
use crate::code::{CodeBuilder, CodeFragment};
use crate::expression::Expression;
use crate::resolve::InstanceExpression;
use crate::types::{ClassName, TypePath, TypeRef};

static DEFAULT_TRAIT: Lazy<TypePath> = Lazy::new(|| TypePath::new("::std::default::Default"));

/// Select the instance expression matching the category of the binding
pub fn strategy_for(binding: &Binding) -> Box<dyn InstanceExpression + '_> {
    match binding.kind() {
        BindingKind::Injection {
            constructor,
            arguments,
        } => Box::new(ConstructorInvocation::new(binding, constructor, arguments)),
        BindingKind::Provision {
            module,
            method,
            arguments,
        } => Box::new(ProvisionInvocation::new(binding, module, method, arguments)),
        BindingKind::BoundInstance { field } => Box::new(BoundInstanceAccess::new(binding, field)),
        BindingKind::MultiboundSet { elements } => Box::new(SetContribution::new(binding, elements)),
    }
}

/// Call a constructor of the bound type: `Config::new(a, b)`
pub struct ConstructorInvocation<'a> {
    binding: &'a Binding,
    constructor: &'a str,
    arguments: &'a [CodeFragment],
}

impl<'a> ConstructorInvocation<'a> {
    pub fn new(binding: &'a Binding, constructor: &'a str, arguments: &'a [CodeFragment]) -> Self {
        Self {
            binding,
            constructor,
            arguments,
        }
    }
}

impl InstanceExpression for ConstructorInvocation<'_> {
    fn binding(&self) -> &Binding {
        self.binding
    }

    fn instance_expression(&self, _requesting_class: &ClassName) -> Expression {
        let key = self.binding.key();
        // generic types need the qualified form in expression position
        let receiver = match key {
            TypeRef::Path { path, args } if args.is_empty() => CodeFragment::builder().path(path),
            _ => CodeFragment::builder().text("<").type_ref(key).text(">"),
        };
        let code = call(receiver, self.constructor, self.arguments);
        Expression::new(key.clone(), code)
    }
}

/// Call a provider function of a module: `AppModule::provide_config()`
///
/// Calls from within the module itself go through `Self`.
pub struct ProvisionInvocation<'a> {
    binding: &'a Binding,
    module: &'a TypePath,
    method: &'a str,
    arguments: &'a [CodeFragment],
}

impl<'a> ProvisionInvocation<'a> {
    pub fn new(
        binding: &'a Binding,
        module: &'a TypePath,
        method: &'a str,
        arguments: &'a [CodeFragment],
    ) -> Self {
        Self {
            binding,
            module,
            method,
            arguments,
        }
    }
}

impl InstanceExpression for ProvisionInvocation<'_> {
    fn binding(&self) -> &Binding {
        self.binding
    }

    fn instance_expression(&self, requesting_class: &ClassName) -> Expression {
        let receiver = if requesting_class == self.module {
            CodeFragment::builder().text("Self")
        } else {
            CodeFragment::builder().path(self.module)
        };
        let code = call(receiver, self.method, self.arguments);
        Expression::new(self.binding.key().clone(), code)
    }
}

/// Clone an instance stored in a field of the component: `self.config.clone()`
pub struct BoundInstanceAccess<'a> {
    binding: &'a Binding,
    field: &'a str,
}

impl<'a> BoundInstanceAccess<'a> {
    pub fn new(binding: &'a Binding, field: &'a str) -> Self {
        Self { binding, field }
    }
}

impl InstanceExpression for BoundInstanceAccess<'_> {
    fn binding(&self) -> &Binding {
        self.binding
    }

    fn instance_expression(&self, _requesting_class: &ClassName) -> Expression {
        let code = CodeFragment::of(format!("self.{}.clone()", self.field));
        Expression::new(self.binding.key().clone(), code)
    }
}

/// Collect all contributions of a set multibinding: `[a, b].into_iter().collect()`
pub struct SetContribution<'a> {
    binding: &'a Binding,
    elements: &'a [CodeFragment],
}

impl<'a> SetContribution<'a> {
    pub fn new(binding: &'a Binding, elements: &'a [CodeFragment]) -> Self {
        Self { binding, elements }
    }
}

impl InstanceExpression for SetContribution<'_> {
    fn binding(&self) -> &Binding {
        self.binding
    }

    fn instance_expression(&self, _requesting_class: &ClassName) -> Expression {
        let code = if self.elements.is_empty() {
            CodeFragment::builder()
                .path(&DEFAULT_TRAIT)
                .text("::default()")
                .build()
        } else {
            CodeFragment::builder()
                .text("[")
                .join(self.elements, ", ")
                .text("].into_iter().collect()")
                .build()
        };
        Expression::new(self.binding.key().clone(), code)
    }

    /// The target of `collect()` and `default()` is only known from the expected type
    fn explicit_type_parameter(&self, _requesting_class: &ClassName) -> CodeFragment {
        CodeFragment::turbofish(self.binding.key())
    }
}

fn call(receiver: CodeBuilder, function: &str, arguments: &[CodeFragment]) -> CodeFragment {
    receiver
        .text(format!("::{function}("))
        .join(arguments, ", ")
        .text(")")
        .build()
}
