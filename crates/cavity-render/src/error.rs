use std::fmt::Display;

/// Failures bringing up or driving the Vulkan renderer.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("{context}: {message}")]
    Vulkan {
        context: &'static str,
        message: String,
    },
    #[error("no Vulkan device with a graphics queue and swapchain support")]
    NoDevice,
    #[error("unsupported surface: {0}")]
    Unsupported(&'static str),
}

/// Wrap any displayable Vulkan/winit error with a short description of the
/// step that failed.
pub(crate) fn vk<E: Display>(context: &'static str) -> impl FnOnce(E) -> RenderError {
    move |e| RenderError::Vulkan {
        context,
        message: e.to_string(),
    }
}

/// Fatal start-up errors: nothing could be put on screen.
#[derive(thiserror::Error, Debug)]
pub enum LaunchError {
    #[error("winit event loop failed")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Vulkan renderer failed")]
    Render(#[from] RenderError),
    /// `eframe::Error` is not `Send`, so the fallback cause is kept as text.
    #[error("no display backend available (Vulkan: {vulkan}; eframe: {fallback})")]
    NoBackend {
        vulkan: RenderError,
        fallback: String,
    },
}
