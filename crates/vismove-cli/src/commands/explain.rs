//! Package browsing and the explain flow.

use anyhow::Result;
use colored::Colorize;
use vismove_core::explainer::{FunctionExplanation, ViewMode};

use crate::bootstrap::AppBootstrap;
use crate::output;

pub async fn modules(bootstrap: &AppBootstrap, package_id: &str) -> Result<()> {
    let mut workflow = bootstrap.workflow();
    if let Some(modules) = workflow.parse_package(package_id).await {
        output::print_list("Modules", &modules);
    }
    Ok(())
}

pub async fn functions(bootstrap: &AppBootstrap, package_id: &str, module: &str) -> Result<()> {
    let mut workflow = bootstrap.workflow();
    if workflow.parse_package(package_id).await.is_none() {
        return Ok(());
    }
    if let Some(functions) = workflow.select_module(module) {
        output::print_list(&format!("Functions in {module}"), &functions);
    }
    Ok(())
}

pub struct ExplainArgs<'a> {
    pub package_id: &'a str,
    pub module: &'a str,
    pub function: &'a str,
    pub view: ViewMode,
    pub save: Option<&'a str>,
}

/// Explains one function, then optionally saves the result.
///
/// Saving only exports the transaction, so the new explanation id is not
/// known here; rate it later with `vismove rate <id> <rating>`.
pub async fn explain(bootstrap: &AppBootstrap, args: ExplainArgs<'_>) -> Result<()> {
    let mut workflow = bootstrap.workflow();
    if workflow.parse_package(args.package_id).await.is_none()
        || workflow.select_module(args.module).is_none()
    {
        return Ok(());
    }

    let Some(explanation) = workflow.select_function(args.function).await else {
        return Ok(());
    };
    print_explanation(explanation, args.view);

    if let Some(title) = args.save {
        workflow.save_explanation(title).await;
    }
    Ok(())
}

fn print_explanation(explanation: &FunctionExplanation, view: ViewMode) {
    println!("{}", view.to_string().bold());
    println!("{}", explanation.view(view));

    if !explanation.concepts_to_explain.is_empty() {
        println!();
        println!("{}", "Concepts".bold());
        for concept in &explanation.concepts_to_explain {
            println!("  - {concept}");
        }
    }
    if !explanation.uml_sequence_diagram.is_empty() {
        println!();
        println!("{}", "Sequence diagram".bold());
        println!("{}", explanation.uml_sequence_diagram.dimmed());
    }
}
