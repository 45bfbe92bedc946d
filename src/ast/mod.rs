/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program root and the statement/expression sum types
/// - expressions: Definitions for the expression node types
/// - statements: Definitions for the statement node types
///
/// Every node renders to a canonical string through `Display`.
pub mod ast;
pub mod expressions;
pub mod statements;
