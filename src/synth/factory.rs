use crate::graph::node::GraphNode;

/// Factory for creating voices with a specific sound design
///
/// This is the instrument layer: describe the sound once, and `PolySynth`
/// asks the factory for one identical graph per voice. Closures returning a
/// graph and `Patch` both implement it.
pub trait VoiceFactory: Send {
    type Voice: GraphNode;

    fn create_voice(&self) -> Self::Voice;
}

impl<F, T> VoiceFactory for F
where
    F: Fn() -> T + Send,
    T: GraphNode,
{
    type Voice = T;

    fn create_voice(&self) -> Self::Voice {
        self()
    }
}
