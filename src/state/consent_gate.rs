//! One-time consent gate in front of captured payload data.
//!
//! The gate decides, each time the view becomes visible, whether payload
//! content may be revealed immediately or a blocking warning must be shown
//! first. Acceptance is persisted through the shared [`ConsentStore`], so
//! later view instances reveal without prompting.

use crate::consent::SharedConsentStore;

/// Gate states.
///
/// `Prompting` is left only through [`PromptChoice::Accept`]; a Decline or
/// Dismiss closes the view instead, tearing the gate down with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Not yet evaluated for the current visibility.
    Unresolved,
    /// A warning prompt is in front of the user.
    Prompting,
    /// Content may be shown.
    Revealed,
}

/// What the host must do after [`ConsentGate::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Bind the data source and start rendering.
    Reveal,
    /// Withhold rendering and show the warning prompt.
    Prompt,
}

/// The user's resolution of the warning prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// Explicit positive choice: show the data.
    Accept,
    /// Explicit negative choice.
    Decline,
    /// Indirect cancellation (clicking outside, back-navigation).
    /// Identical effect to [`PromptChoice::Decline`].
    Dismiss,
}

/// What the host must do after [`ConsentGate::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Bind the data source and start rendering.
    Reveal,
    /// Close the view. No consent was recorded.
    Close,
}

/// Decides reveal-or-prompt and transitions the consent store on accept.
pub struct ConsentGate {
    state: GateState,
    store: SharedConsentStore,
}

impl std::fmt::Debug for ConsentGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsentGate")
            .field("state", &self.state)
            .field("acknowledged", &self.store.borrow().is_acknowledged())
            .finish()
    }
}

impl ConsentGate {
    /// New gate over the process-wide consent store.
    pub fn new(store: SharedConsentStore) -> Self {
        Self {
            state: GateState::Unresolved,
            store,
        }
    }

    /// Current gate state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Evaluate the gate for a visibility transition.
    ///
    /// Called every time the view becomes visible: while the notice is
    /// unacknowledged, backgrounding and returning re-prompts. Once the
    /// store is acknowledged, this never prompts again for any instance.
    pub fn evaluate(&mut self) -> GateDecision {
        if self.store.borrow().is_acknowledged() {
            self.state = GateState::Revealed;
            GateDecision::Reveal
        } else {
            self.state = GateState::Prompting;
            GateDecision::Prompt
        }
    }

    /// Resolve the warning prompt.
    ///
    /// Accept persists the acknowledgement and reveals; Decline and Dismiss
    /// both close the view without recording anything, leaving the gate in
    /// `Prompting` (the view is torn down with it).
    pub fn resolve(&mut self, choice: PromptChoice) -> GateOutcome {
        match choice {
            PromptChoice::Accept => {
                self.store.borrow_mut().set_acknowledged();
                self.state = GateState::Revealed;
                GateOutcome::Reveal
            }
            PromptChoice::Decline | PromptChoice::Dismiss => GateOutcome::Close,
        }
    }
}
