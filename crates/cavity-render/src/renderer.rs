// Vulkano instance/device/swapchain for the embedded egui canvas.

use std::sync::Arc;
use vulkano::{
    device::{
        physical::{PhysicalDevice, PhysicalDeviceType},
        Device, DeviceCreateInfo, DeviceExtensions, Queue, QueueCreateInfo, QueueFlags,
    },
    image::{view::ImageView, Image, ImageUsage},
    instance::{Instance, InstanceCreateFlags, InstanceCreateInfo, InstanceExtensions},
    swapchain::{self, Surface, Swapchain, SwapchainCreateInfo, SwapchainPresentInfo},
    sync::{self, GpuFuture},
    Validated, VulkanError, VulkanLibrary,
};
use winit::{dpi::LogicalSize, event_loop::ActiveEventLoop, window::Window};

use crate::error::{vk, RenderError};
use crate::{INITIAL_SIZE, TITLE};

fn device_extensions() -> DeviceExtensions {
    DeviceExtensions {
        khr_swapchain: true,
        ..DeviceExtensions::empty()
    }
}

fn create_instance(extensions: InstanceExtensions) -> Result<Arc<Instance>, RenderError> {
    let library = VulkanLibrary::new().map_err(vk("failed to load Vulkan library"))?;
    Instance::new(
        library,
        InstanceCreateInfo {
            flags: InstanceCreateFlags::ENUMERATE_PORTABILITY,
            enabled_extensions: extensions,
            ..Default::default()
        },
    )
    .map_err(vk("failed to create Vulkan instance"))
}

fn device_rank(device: &PhysicalDevice) -> u32 {
    match device.properties().device_type {
        PhysicalDeviceType::DiscreteGpu => 0,
        PhysicalDeviceType::IntegratedGpu => 1,
        PhysicalDeviceType::VirtualGpu => 2,
        PhysicalDeviceType::Cpu => 3,
        PhysicalDeviceType::Other => 4,
        _ => 5,
    }
}

/// Check that a Vulkan loader and a usable device exist before any event
/// loop is created. Returns the name of the device that would be picked.
///
/// Surface support can only be checked once a window exists, so this only
/// looks for a graphics queue and swapchain support.
pub fn probe() -> Result<String, RenderError> {
    let instance = create_instance(InstanceExtensions::empty())?;
    instance
        .enumerate_physical_devices()
        .map_err(vk("failed to enumerate physical devices"))?
        .filter(|p| p.supported_extensions().contains(&device_extensions()))
        .filter(|p| {
            p.queue_family_properties()
                .iter()
                .any(|q| q.queue_flags.intersects(QueueFlags::GRAPHICS))
        })
        .min_by_key(|p| device_rank(p))
        .map(|p| p.properties().device_name.clone())
        .ok_or(RenderError::NoDevice)
}

pub struct Renderer {
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
    pub surface: Arc<Surface>,
    pub swapchain: Arc<Swapchain>,
    pub images: Vec<Arc<Image>>,
    pub image_views: Vec<Arc<ImageView>>,
    pub window: Arc<Window>,
    pub recreate_swapchain: bool,
    previous_frame_end: Option<Box<dyn GpuFuture>>,
}

impl Renderer {
    pub fn new(event_loop: &ActiveEventLoop) -> Result<Self, RenderError> {
        // --- Instance ---
        let required_extensions = Surface::required_extensions(event_loop)
            .map_err(vk("failed to get required extensions"))?;
        let instance = create_instance(required_extensions)?;

        // --- Window + surface ---
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(TITLE)
                        .with_inner_size(LogicalSize::new(INITIAL_SIZE[0], INITIAL_SIZE[1])),
                )
                .map_err(vk("failed to create window"))?,
        );
        let surface = Surface::from_window(instance.clone(), window.clone())
            .map_err(vk("failed to create surface"))?;

        // --- Physical device selection ---
        let (physical_device, queue_family_index) = instance
            .enumerate_physical_devices()
            .map_err(vk("failed to enumerate physical devices"))?
            .filter(|p| p.supported_extensions().contains(&device_extensions()))
            .filter_map(|p| {
                p.queue_family_properties()
                    .iter()
                    .enumerate()
                    .position(|(i, q)| {
                        q.queue_flags.intersects(QueueFlags::GRAPHICS)
                            && p.surface_support(i as u32, &surface).unwrap_or(false)
                    })
                    .map(|i| (p, i as u32))
            })
            .min_by_key(|(p, _)| device_rank(p))
            .ok_or(RenderError::NoDevice)?;

        log::info!(
            "Using device: {} (type: {:?})",
            physical_device.properties().device_name,
            physical_device.properties().device_type,
        );

        // --- Logical device + queue ---
        let (device, mut queues) = Device::new(
            physical_device.clone(),
            DeviceCreateInfo {
                queue_create_infos: vec![QueueCreateInfo {
                    queue_family_index,
                    ..Default::default()
                }],
                enabled_extensions: device_extensions(),
                ..Default::default()
            },
        )
        .map_err(vk("failed to create logical device"))?;
        let queue = queues
            .next()
            .ok_or(RenderError::Unsupported("device exposes no queue"))?;

        // --- Swapchain ---
        let surface_capabilities = physical_device
            .surface_capabilities(&surface, Default::default())
            .map_err(vk("failed to query surface capabilities"))?;
        let image_format = physical_device
            .surface_formats(&surface, Default::default())
            .map_err(vk("failed to query surface formats"))?
            .first()
            .map(|(format, _)| *format)
            .ok_or(RenderError::Unsupported("surface reports no formats"))?;
        let composite_alpha = surface_capabilities
            .supported_composite_alpha
            .into_iter()
            .next()
            .ok_or(RenderError::Unsupported("no composite alpha mode"))?;
        let window_size = window.inner_size();
        let (swapchain, images) = Swapchain::new(
            device.clone(),
            surface.clone(),
            SwapchainCreateInfo {
                min_image_count: surface_capabilities.min_image_count.max(2),
                image_format,
                image_extent: [window_size.width, window_size.height],
                image_usage: ImageUsage::COLOR_ATTACHMENT,
                composite_alpha,
                ..Default::default()
            },
        )
        .map_err(vk("failed to create swapchain"))?;

        let image_views = create_views(&images)?;
        let previous_frame_end = Some(sync::now(device.clone()).boxed());

        Ok(Renderer {
            device,
            queue,
            surface,
            swapchain,
            images,
            image_views,
            window,
            recreate_swapchain: false,
            previous_frame_end,
        })
    }

    pub fn swapchain_format(&self) -> vulkano::format::Format {
        self.swapchain.image_format()
    }

    pub fn recreate_swapchain(&mut self) -> Result<(), RenderError> {
        let window_size = self.window.inner_size();
        if window_size.width == 0 || window_size.height == 0 {
            return Ok(());
        }
        let (new_swapchain, new_images) = self
            .swapchain
            .recreate(SwapchainCreateInfo {
                image_extent: [window_size.width, window_size.height],
                ..self.swapchain.create_info()
            })
            .map_err(vk("failed to recreate swapchain"))?;

        self.image_views = create_views(&new_images)?;
        self.swapchain = new_swapchain;
        self.images = new_images;
        self.recreate_swapchain = false;
        Ok(())
    }

    /// Acquire the next swapchain image. Returns the image index and acquire future,
    /// or None if the frame should be skipped.
    pub fn begin_frame(&mut self) -> Option<(u32, swapchain::SwapchainAcquireFuture)> {
        // Clean up finished GPU work
        if let Some(ref mut future) = self.previous_frame_end {
            future.cleanup_finished();
        }

        if self.recreate_swapchain {
            if let Err(e) = self.recreate_swapchain() {
                log::error!("{e}");
                return None;
            }
        }

        let (image_index, suboptimal, acquire_future) =
            match swapchain::acquire_next_image(self.swapchain.clone(), None)
                .map_err(Validated::unwrap)
            {
                Ok(r) => r,
                Err(VulkanError::OutOfDate) => {
                    self.recreate_swapchain = true;
                    return None;
                }
                Err(e) => {
                    log::error!("failed to acquire next image: {e}");
                    return None;
                }
            };
        if suboptimal {
            self.recreate_swapchain = true;
        }
        Some((image_index, acquire_future))
    }

    /// Keep the submitted frame's future so the next frame can join it.
    pub fn end_frame(&mut self, after_future: Box<dyn GpuFuture>) {
        self.previous_frame_end = Some(after_future);
    }

    /// Get the previous frame end future, for joining with new GPU work.
    pub fn take_previous_frame_end(&mut self) -> Box<dyn GpuFuture> {
        self.previous_frame_end
            .take()
            .unwrap_or_else(|| sync::now(self.device.clone()).boxed())
    }

    pub fn present(
        &mut self,
        after_future: Box<dyn GpuFuture>,
        image_index: u32,
    ) -> Box<dyn GpuFuture> {
        let future = after_future
            .then_swapchain_present(
                self.queue.clone(),
                SwapchainPresentInfo::swapchain_image_index(self.swapchain.clone(), image_index),
            )
            .then_signal_fence_and_flush();

        match future.map_err(Validated::unwrap) {
            Ok(future) => future.boxed(),
            Err(VulkanError::OutOfDate) => {
                self.recreate_swapchain = true;
                sync::now(self.device.clone()).boxed()
            }
            Err(e) => {
                log::error!("failed to flush future: {e}");
                sync::now(self.device.clone()).boxed()
            }
        }
    }
}

fn create_views(images: &[Arc<Image>]) -> Result<Vec<Arc<ImageView>>, RenderError> {
    images
        .iter()
        .map(|image| ImageView::new_default(image.clone()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(vk("failed to create image view"))
}
