use crate::ast::Ast;

// Semantics-preserving: only literal-only operator nodes fold, using the same
// arithmetic as the evaluator. Calls are never folded (`random` is impure, and an
// unknown name must still fail at evaluation).
pub(crate) fn optimize(ast: Ast) -> Ast {
    fixpoint(ast, 2) // one pass folds bottom-up already; the second only confirms
}

fn fixpoint(mut ast: Ast, max_rounds: usize) -> Ast {
    for _ in 0..max_rounds {
        let before = ast.clone();
        let next = fold(ast);
        if same_tree(&next, &before) {
            return next;
        }
        ast = next;
    }
    ast
}

// Structural equality with literals compared bitwise, so a folded NaN matches itself.
fn same_tree(a: &Ast, b: &Ast) -> bool {
    match (a, b) {
        (Ast::Literal(x), Ast::Literal(y)) => x.to_bits() == y.to_bits(),
        (Ast::Variable(x), Ast::Variable(y)) => x == y,
        (
            Ast::Unary { op, operand },
            Ast::Unary {
                op: op2,
                operand: operand2,
            },
        ) => op == op2 && same_tree(operand, operand2),
        (
            Ast::Binary { op, left, right },
            Ast::Binary {
                op: op2,
                left: left2,
                right: right2,
            },
        ) => op == op2 && same_tree(left, left2) && same_tree(right, right2),
        (
            Ast::Call { name, args },
            Ast::Call {
                name: name2,
                args: args2,
            },
        ) => {
            name == name2
                && args.len() == args2.len()
                && args.iter().zip(args2).all(|(x, y)| same_tree(x, y))
        }
        _ => false,
    }
}

fn fold(ast: Ast) -> Ast {
    match ast {
        Ast::Literal(_) | Ast::Variable(_) => ast,
        Ast::Unary { op, operand } => match fold(*operand) {
            Ast::Literal(v) => Ast::Literal(op.apply(v)),
            other => Ast::unary(op, other),
        },
        Ast::Binary { op, left, right } => match (fold(*left), fold(*right)) {
            (Ast::Literal(a), Ast::Literal(b)) => Ast::Literal(op.apply(a, b)),
            (a, b) => Ast::binary(op, a, b),
        },
        Ast::Call { name, args } => Ast::Call {
            name,
            args: args.into_iter().map(fold).collect(),
        },
    }
}
