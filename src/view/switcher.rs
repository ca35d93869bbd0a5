//! Switching between the generated view and the original page

/// Which of the two page roots is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Original,
    Generated,
}

impl ViewState {
    pub fn flipped(self) -> Self {
        match self {
            ViewState::Original => ViewState::Generated,
            ViewState::Generated => ViewState::Original,
        }
    }

    pub fn is_generated(self) -> bool {
        self == ViewState::Generated
    }
}

/// The two roots whose visibility the switcher controls
pub trait ViewSurface {
    fn set_original_visible(&self, visible: bool);
    fn set_generated_visible(&self, visible: bool);
}

/// Owns the view state; exactly one root is visible after every call
#[derive(Debug)]
pub struct ViewSwitcher<S: ViewSurface> {
    surface: S,
    state: ViewState,
}

impl<S: ViewSurface> ViewSwitcher<S> {
    /// Starts on the original page; nothing is changed until `activate`
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: ViewState::Original,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show the generated view, used once it has been installed
    pub fn activate(&mut self) {
        self.show(ViewState::Generated);
    }

    /// Flip to the other view and return the new state
    pub fn toggle(&mut self) -> ViewState {
        self.show(self.state.flipped());
        log::debug!("view toggled to {:?}", self.state);
        self.state
    }

    fn show(&mut self, state: ViewState) {
        let generated = state.is_generated();
        self.surface.set_original_visible(!generated);
        self.surface.set_generated_visible(generated);
        self.state = state;
    }
}
