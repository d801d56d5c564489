use trellis::Kind;

use crate::engine::Parser;
use crate::result::Match;

// One thin consumer method per terminal class. Grammars match terminals
// through these rather than naming kinds directly, and a dialect that
// widens the terminal vocabulary does so with a subtrait.
macro_rules! terminals {
    (pub trait $name:ident $(: $super:ident)? { $($method:ident => $kind:ident),* $(,)? }) => {
        pub trait $name $(: $super)? {
            $(fn $method(&mut self) -> Match<()>;)*
        }

        impl<'a> $name for Parser<'a> {
            $(fn $method(&mut self) -> Match<()> {
                self.terminal(Kind::$kind)
            })*
        }
    }
}

terminals! {
    pub trait BaseTerminals {
        identifier => Identifier,
        numeric_literal => NumericLiteral,
        string_literal => StringLiteral,

        var_kw => Var,
        function_kw => Function,
        new_kw => New,
        this_kw => This,
        if_kw => If,
        else_kw => Else,
        while_kw => While,
        do_kw => Do,
        for_kw => For,
        return_kw => Return,
        break_kw => Break,
        continue_kw => Continue,
        throw_kw => Throw,
        typeof_kw => Typeof,
        void_kw => Void,
        delete_kw => Delete,
        instanceof_kw => Instanceof,
        in_kw => In,
        true_kw => True,
        false_kw => False,
        null_kw => Null,

        l_brace => LBrace,
        r_brace => RBrace,
        l_paren => LParen,
        r_paren => RParen,
        l_brack => LBrack,
        r_brack => RBrack,
        dot => Dot,
        semicolon => Semicolon,
        comma => Comma,
        l_angle => LAngle,
        r_angle => RAngle,
        l_eq => LEq,
        g_eq => GEq,
        eq_eq => EqEq,
        not_eq => NotEq,
        strict_eq => StrictEq,
        strict_not_eq => StrictNotEq,
        plus => Plus,
        minus => Minus,
        star => Star,
        mod_op => Mod,
        slash => Slash,
        inc => Inc,
        dec => Dec,
        l_shift => LShift,
        r_shift => RShift,
        ur_shift => URShift,
        bit_and => BitAnd,
        bit_or => BitOr,
        bit_xor => BitXor,
        bang => Bang,
        tilde => Tilde,
        logical_and => LogicalAnd,
        logical_or => LogicalOr,
        question => Question,
        colon => Colon,
        eq => Eq,
        plus_eq => PlusEq,
        minus_eq => MinusEq,
        star_eq => StarEq,
        slash_eq => SlashEq,
        mod_eq => ModEq,
        l_shift_eq => LShiftEq,
        r_shift_eq => RShiftEq,
        ur_shift_eq => URShiftEq,
        bit_and_eq => BitAndEq,
        bit_or_eq => BitOrEq,
        bit_xor_eq => BitXorEq,
    }
}

terminals! {
    pub trait ModuleTerminals: BaseTerminals {
        let_kw => Let,
        const_kw => Const,
        import_kw => Import,
        export_kw => Export,
        default_kw => Default,
        from_kw => From,
        as_kw => As,
        arrow => Arrow,
    }
}
