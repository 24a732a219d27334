mod errors;
mod lexer;
