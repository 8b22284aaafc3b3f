// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "glcam-viewer")]
#[command(about = "Interactive camera/matrix test harness", long_about = None)]
pub struct Cli {
    /// Start pose as "lx,ly,lz,ex,ey,ez,roll"
    #[arg(long)]
    pub pose: Option<String>,

    /// Top-down orthographic projection instead of perspective
    #[arg(long, default_value = "false")]
    pub ortho: bool,

    /// Flip the model Y axis in the projection
    #[arg(long = "flip-y", default_value = "false")]
    pub flip_y: bool,

    /// Positive Z runs away from the viewer
    #[arg(long = "z-away", default_value = "false")]
    pub z_away: bool,

    /// Smallest zoom factor the camera may reach
    #[arg(long = "zoom-min", default_value_t = 0.01)]
    pub zoom_min: f32,

    /// Largest zoom factor the camera may reach
    #[arg(long = "zoom-max", default_value_t = 300.0)]
    pub zoom_max: f32,
}
