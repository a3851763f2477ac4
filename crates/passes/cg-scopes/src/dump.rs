//! Plain-text rendering of a scope tree and its container collections

use crate::scope::{Anchor, ScopeId, ScopeTree};
use cg_graph::{DeclId, Graph};
use cg_intern::Interner;
use std::fmt;

/// Render the scope tree rooted at the global scope
///
/// Each scope lists its flat value log; scopes anchored to a container also
/// list every typed collection of that container.
#[must_use]
pub fn dump<'graph>(
    graph: &'graph Graph,
    tree: &'graph ScopeTree,
    interner: &'graph Interner,
) -> Dump<'graph> {
    Dump {
        graph,
        tree,
        interner,
    }
}

/// Display adapter returned by [`dump`]
pub struct Dump<'graph> {
    graph: &'graph Graph,
    tree: &'graph ScopeTree,
    interner: &'graph Interner,
}

impl Dump<'_> {
    fn write_scope(&self, formatter: &mut fmt::Formatter<'_>, scope: ScopeId, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let data = self.tree.get(scope);

        write!(formatter, "{indent}scope #{} {}", u32::from(scope.into_raw()), data.kind())?;
        match data.anchor() {
            Some(Anchor::Container(container)) => {
                let owner = self.graph.container(container).owner();
                write!(formatter, " ({})", self.name(owner))?;
            }
            Some(Anchor::Construct(construct)) => write!(formatter, " <{}>", construct.as_str())?,
            None => {}
        }
        writeln!(formatter)?;

        write!(formatter, "{indent}  values: ")?;
        self.write_list(formatter, data.value_declarations())?;
        writeln!(formatter)?;

        if let Some(container) = data.container() {
            let container_data = self.graph.container(container);
            for &collection in container_data.collections() {
                write!(formatter, "{indent}  {}: ", collection.as_str())?;
                self.write_list(formatter, self.graph.entries(container, collection))?;
                writeln!(formatter)?;
            }
        }

        for child in self.tree.children(scope) {
            self.write_scope(formatter, child, depth + 1)?;
        }
        Ok(())
    }

    fn write_list(&self, formatter: &mut fmt::Formatter<'_>, decls: &[DeclId]) -> fmt::Result {
        formatter.write_str("[")?;
        for (index, &decl) in decls.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            formatter.write_str(self.name(decl))?;
        }
        formatter.write_str("]")
    }

    fn name(&self, decl: DeclId) -> &str {
        self.interner.resolve(self.graph.decl(decl).name)
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_scope(formatter, self.tree.global(), 0)
    }
}
