use std::collections::HashSet;

use crate::ast::Ast;

/// Variable names in left-to-right first-appearance order, without duplicates.
/// Function names are not variables and never appear here.
pub(crate) fn collect_vars(ast: &Ast) -> Vec<String> {
    fn walk<'a>(node: &'a Ast, seen: &mut HashSet<&'a str>, out: &mut Vec<String>) {
        match node {
            Ast::Literal(_) => {}
            Ast::Variable(name) => {
                if seen.insert(name) {
                    out.push(name.clone());
                }
            }
            Ast::Unary { operand, .. } => walk(operand, seen, out),
            Ast::Binary { left, right, .. } => {
                walk(left, seen, out);
                walk(right, seen, out);
            }
            Ast::Call { args, .. } => {
                for a in args {
                    walk(a, seen, out);
                }
            }
        }
    }
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(ast, &mut seen, &mut out);
    out
}

/// Names of every function the expression calls, allowed or not.
pub(crate) fn collect_calls(ast: &Ast) -> Vec<String> {
    fn walk(node: &Ast, out: &mut Vec<String>) {
        match node {
            Ast::Literal(_) | Ast::Variable(_) => {}
            Ast::Unary { operand, .. } => walk(operand, out),
            Ast::Binary { left, right, .. } => {
                walk(left, out);
                walk(right, out);
            }
            Ast::Call { name, args } => {
                if !out.contains(name) {
                    out.push(name.clone());
                }
                for a in args {
                    walk(a, out);
                }
            }
        }
    }
    let mut out = Vec::new();
    walk(ast, &mut out);
    out
}
