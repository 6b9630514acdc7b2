use tracing::{debug, info};

use crate::{
    ast::{
        ast::Node,
        expressions::Literal,
        statements::VariableDeclaration,
    },
    errors::errors::Error,
    evaluator::evaluator::evaluate_constant,
    symbols::symbols::{SymbolTable, GLOBAL_SCOPE},
};

/// Runs folding and pruning until a full pass makes no rewrite.
///
/// The symbol table is only read.
pub fn optimize(program: Node, symbols: &SymbolTable) -> Result<Node, Error> {
    let mut program = program;
    let mut pass = 0;

    loop {
        pass += 1;

        let mut folded = 0;
        program = fold(program, &mut folded)?;

        let mut pruned = 0;
        program = prune(program, symbols, &mut pruned)?;

        debug!("pass {}: {} folded, {} pruned", pass, folded, pruned);
        if folded == 0 && pruned == 0 {
            break;
        }
    }

    info!("optimizer reached a fixed point after {} passes", pass);
    Ok(program)
}

/// Post-order constant folding.
///
/// A constant expression is replaced by a literal carrying the expression's
/// span. Declarations get their type tag refreshed from the new initializer.
pub fn fold(node: Node, folded: &mut usize) -> Result<Node, Error> {
    let node = node.try_map_children(&mut |child| fold(child, folded))?;

    match node {
        Node::Expression(expression) if expression.is_constant() => {
            let span = expression.span.clone();
            let value = evaluate_constant(&Node::Expression(expression))?;
            debug!("folded expression at {}:{} to {}", span.line(), span.begin_column(), value);

            *folded += 1;
            Ok(Node::Literal(Literal { value, span }))
        }
        Node::VariableDeclaration(mut declaration) => {
            declaration.type_tag = VariableDeclaration::tag_for(declaration.initializer.as_deref());
            Ok(Node::VariableDeclaration(declaration))
        }
        other => Ok(other),
    }
}

/// A declaration is dead when its name has a global symbol that was never used.
///
/// Names without a global symbol (function locals, parameters) are kept.
fn is_dead(node: &Node, symbols: &SymbolTable) -> bool {
    match node {
        Node::VariableDeclaration(declaration) => symbols
            .get_use_count(declaration.name(), GLOBAL_SCOPE)
            .is_some_and(|uses| uses <= 0),
        _ => false,
    }
}

/// Removes dead declarations from every statement list, then recurses into
/// what is left.
pub fn prune(node: Node, symbols: &SymbolTable, pruned: &mut usize) -> Result<Node, Error> {
    let mut node = node;

    node.retain_statements(&mut |statement| {
        if is_dead(statement, symbols) {
            debug!("pruned {}", statement.describe());
            *pruned += 1;
            return false;
        }
        true
    });

    node.try_map_children(&mut |child| prune(child, symbols, pruned))
}
