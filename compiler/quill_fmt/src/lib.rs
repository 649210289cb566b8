//! Quill Printer
//!
//! Turns a syntax tree back into source text.
//!
//! # Architecture
//!
//! A single top-down walk over the tree using the visitor protocol:
//!
//! 1. **Trivia first**: a terminal with captured trivia prints it verbatim,
//!    so a parsed tree reproduces its source exactly
//! 2. **Directives otherwise**: composite nodes request a space or an end
//!    of statement before a child; these only appear in the output when
//!    the next terminal was synthesized or edited
//!
//! # Modules
//!
//! - [`emitter`]: Output abstraction for string and writer output
//! - [`printer`]: The printing visitor

pub mod emitter;
pub mod printer;

pub use emitter::{Emitter, StringEmitter, WriterEmitter};
pub use printer::Printer;

use quill_ir::{NodeId, SyntaxTree};

/// Print the subtree at `root` to a string.
///
/// # Example
///
/// ```
/// let tree = quill_parse::parse_script("x = 1 +  2").unwrap();
/// let root = tree.root().unwrap();
/// assert_eq!(quill_fmt::print(&tree, root), "x = 1 +  2");
/// ```
pub fn print(tree: &SyntaxTree, root: NodeId) -> String {
    print_to(tree, root, StringEmitter::new()).output()
}

/// Print the subtree at `root` through `emitter`.
pub fn print_to<E: Emitter>(tree: &SyntaxTree, root: NodeId, emitter: E) -> E {
    let mut printer = Printer::new(emitter, root);
    tree.accept(root, &mut printer);
    printer.into_emitter()
}
