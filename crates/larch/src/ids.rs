use larch_util::make_type_idx;

use crate::grammar::Production;
use crate::lookahead::TerminalSet;

// Non-terminal ids index the per-non-terminal tables (names, first/follow
// sets, production lists).
make_type_idx!(pub NT => String, TerminalSet, Vec<ProductionId>);
make_type_idx!(pub TerminalId);
make_type_idx!(pub ProductionId => Production);

// Handed out by the interning arena.
make_type_idx!(pub StateId);
make_type_idx!(pub LookaheadId);
make_type_idx!(pub EdgeId);
