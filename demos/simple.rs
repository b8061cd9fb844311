use hanami_codegen::*;

// Bindings of a small application component, as resolved by the dependency graph

fn bindings() -> Result<Vec<Binding>, CodegenError> {
    Ok(vec![
        Binding::bound_instance("crate::Settings".parse()?, "settings"),
        Binding::provision(
            "::std::sync::Arc<dyn crate::Logger>".parse()?,
            TypePath::new("crate::modules::LogModule"),
            "provide_logger",
            [CodeFragment::of("self.settings.clone()")],
        ),
        Binding::injection(
            "crate::DateLogger".parse()?,
            "new",
            [CodeFragment::of("self.logger()")],
        ),
        Binding::multibound_set(
            "::std::collections::BTreeSet<String>".parse()?,
            [
                CodeFragment::of("\"console\".to_string()"),
                CodeFragment::of("\"file\".to_string()"),
            ],
        ),
    ])
}

fn main() -> Result<(), CodegenError> {
    let options = CodegenOptions::default();
    let expressions = BindingExpressions::new(&Types, &options);
    let component = ClassName::new("crate::AppComponent");

    let mut generated = Vec::new();
    for binding in bindings()? {
        for kind in [RequestKind::Instance, RequestKind::Future] {
            let expression = expressions.dependency_expression(&binding, kind, &component)?;
            expression.to_syn_expr()?;
            generated.push((kind, expression));
        }
    }

    let imports = Imports::collect(generated.iter().map(|(_, expression)| expression.code()));
    for declaration in imports.use_declarations() {
        println!("{}", declaration);
    }
    println!();
    for (kind, expression) in &generated {
        println!("// {} of {}", kind, expression.ty());
        println!("{}", imports.render(expression.code()));
    }

    Ok(())
}
