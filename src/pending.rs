use crate::operator::Operator;

/// Digits typed ahead of a command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Count {
    current: Option<u32>,
}

impl Count {
    pub(crate) fn push_digit(&mut self, d: u32, max: u32) {
        let next = self
            .current
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(d)
            .min(max);
        self.current = Some(next);
    }

    pub(crate) fn is_started(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn peek(&self) -> Option<u32> {
        self.current
    }

    pub(crate) fn take(&mut self) -> Option<u32> {
        self.current.take()
    }

    pub(crate) fn clear(&mut self) {
        self.current = None;
    }
}

/// Combine an operator's count with its motion's count.
///
/// `3d2w` deletes six words; when neither side was typed there is no count.
pub(crate) fn combine(op: Option<u32>, motion: Option<u32>, max: u32) -> Option<u32> {
    match (op, motion) {
        (None, None) => None,
        (a, b) => Some(
            a.unwrap_or(1)
                .saturating_mul(b.unwrap_or(1))
                .clamp(1, max.max(1)),
        ),
    }
}

/// An operator waiting for the motion that gives it a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingOperator {
    pub op: Operator,
    /// Count typed before the operator key.
    pub count: Option<u32>,
}

/// Which character search is waiting for its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FindSpec {
    pub forward: bool,
    /// `t`/`T` stop one column short of the target.
    pub till: bool,
}

/// Second key of a two-key sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prefix {
    /// `g`, completed by another `g`.
    G,
    /// `f`/`t`/`F`/`T`, completed by the target character.
    Find(FindSpec),
}

/// The in-progress part of a multi-key command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingInput {
    #[default]
    Idle,
    /// `d`, `y`: waiting for a motion or the doubled operator key.
    Operator(PendingOperator),
    /// A prefix key, possibly under an operator (`dgg`, `dfx`).
    Prefix {
        prefix: Prefix,
        operator: Option<PendingOperator>,
    },
}

impl PendingInput {
    pub(crate) fn operator(&self) -> Option<PendingOperator> {
        match *self {
            PendingInput::Idle => None,
            PendingInput::Operator(op) => Some(op),
            PendingInput::Prefix { operator, .. } => operator,
        }
    }

    /// True while the next character is consumed as a find target.
    pub(crate) fn awaits_char(&self) -> bool {
        matches!(
            self,
            PendingInput::Prefix {
                prefix: Prefix::Find(_),
                ..
            }
        )
    }
}
