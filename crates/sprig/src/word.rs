use trellis::Kind;

// Reserved words, plus the module words the grammar needs as distinct
// terminals (`from`, `as`). Everything else lexes as Identifier.
pub fn reserved(word: &str) -> Option<Kind> {
    Some(match word {
        "null"       => Kind::Null,       "true"       => Kind::True,
        "false"      => Kind::False,      "break"      => Kind::Break,
        "case"       => Kind::Case,       "catch"      => Kind::Catch,
        "class"      => Kind::Class,      "const"      => Kind::Const,
        "continue"   => Kind::Continue,   "debugger"   => Kind::Debugger,
        "default"    => Kind::Default,    "delete"     => Kind::Delete,
        "do"         => Kind::Do,         "else"       => Kind::Else,
        "export"     => Kind::Export,     "finally"    => Kind::Finally,
        "for"        => Kind::For,        "function"   => Kind::Function,
        "if"         => Kind::If,         "import"     => Kind::Import,
        "in"         => Kind::In,         "instanceof" => Kind::Instanceof,
        "let"        => Kind::Let,        "new"        => Kind::New,
        "return"     => Kind::Return,     "super"      => Kind::Super,
        "switch"     => Kind::Switch,     "this"       => Kind::This,
        "throw"      => Kind::Throw,      "try"        => Kind::Try,
        "typeof"     => Kind::Typeof,     "var"        => Kind::Var,
        "void"       => Kind::Void,       "while"      => Kind::While,
        "with"       => Kind::With,       "from"       => Kind::From,
        "as"         => Kind::As,
        _ => return None
    })
}
