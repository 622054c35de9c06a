use crate::operator::Span;
use crate::traits::TextOps;
use crate::types::{Position, Selection, VisualKind};

/// One visual session: the anchor fixed where it began, and its kind.
///
/// The active end is always the cursor the host passes in, so it is not
/// stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VisualSession {
    anchor: Position,
    kind: VisualKind,
}

impl VisualSession {
    pub(crate) fn start(anchor: Position, kind: VisualKind) -> Self {
        VisualSession { anchor, kind }
    }

    pub(crate) fn kind(&self) -> VisualKind {
        self.kind
    }

    pub(crate) fn selection(&self, active: Position) -> Selection {
        Selection {
            anchor: self.anchor,
            active,
            kind: self.kind,
        }
    }

    /// Reinterpret the same anchor and active end under `kind`.
    pub(crate) fn switch(&mut self, kind: VisualKind) {
        self.kind = kind;
    }

    /// The text an operator acts on, and the position it starts from.
    pub(crate) fn span<T: TextOps + ?Sized>(&self, text: &T, active: Position) -> (Span, Position) {
        let selection = self.selection(active);
        (Span::from_selection(text, &selection), selection.ordered().0)
    }
}
