use chroma_detection::{Frame, FrameConfig, PixelFormat};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;

use crate::config::CameraConfig;
use crate::error::Result;
use crate::io::VideoSource;

pub fn get_camera(config: &CameraConfig) -> Result<Camera> {
    let index = CameraIndex::Index(config.device_id);
    let wanted = CameraFormat::new(
        Resolution::new(config.width, config.height),
        FrameFormat::MJPEG,
        config.fps,
    );
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(wanted));

    let camera = Camera::new(index, requested)?;
    Ok(camera)
}

/// Live frames from a capture device.
pub struct CameraSource {
    camera: Camera,
    rgb_buf: Vec<u8>,
}

impl CameraSource {
    pub fn open(config: &CameraConfig) -> Result<Self> {
        let mut camera = get_camera(config)?;
        camera.open_stream()?;
        let format = camera.camera_format();
        tracing::info!(
            device_id = config.device_id,
            width = format.width(),
            height = format.height(),
            fps = format.frame_rate(),
            "camera stream opened"
        );
        Ok(Self {
            camera,
            rgb_buf: Vec::new(),
        })
    }

    fn capture_frame_into(&mut self) -> Result<(u32, u32)> {
        let frame = self.camera.frame()?;
        let decoded = frame.decode_image::<RgbFormat>()?;

        let width = decoded.width();
        let height = decoded.height();
        let expected = (width * height * 3) as usize;

        self.rgb_buf.resize(expected, 0);
        self.rgb_buf.copy_from_slice(decoded.as_raw());
        Ok((width, height))
    }
}

impl VideoSource for CameraSource {
    fn read_frame(&mut self) -> Result<Option<Frame>> {
        let (width, height) = self.capture_frame_into()?;
        if width == 0 || height == 0 {
            return Ok(None);
        }
        let frame = Frame::new(FrameConfig {
            data: &self.rgb_buf,
            width,
            height,
            format: PixelFormat::RGB8,
        })?;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!(error = %e, "failed to stop camera stream");
        } else {
            tracing::debug!("camera stream stopped");
        }
    }
}
