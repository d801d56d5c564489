//! The ECMAScript grammars driving the engine. `es5` is the base
//! dialect; `es2015` layers module items, lexical declarations, and
//! shorthand methods on top by overriding rules by name.

pub mod es2015;
pub mod es5;

pub use es2015::Es2015Grammar;
pub use es5::Es5Grammar;
