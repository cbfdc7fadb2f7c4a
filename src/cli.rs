//! Command-line argument parsing.

use clap::Parser;

use crate::params::{MatcapSources, OrbitParams, RenderConfig, SurfaceParams, AMPLITUDE_RANGE};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "matcap-waves")]
#[command(about = "Noise-displaced plane with matcap shading", long_about = None)]
pub struct Args {
    /// Initial noise amplitude (0 to 1.5)
    #[arg(
        long,
        value_name = "AMOUNT",
        default_value_t = 1.0,
        value_parser = parse_amplitude
    )]
    pub amplitude: f32,

    /// Grid segments per plane unit
    #[arg(
        long,
        value_name = "SEGMENTS",
        default_value_t = 12,
        value_parser = clap::value_parser!(u32).range(1..=256)
    )]
    pub resolution: u32,

    /// Padding around the matcap preview (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 3.0)]
    pub preview_padding: f32,

    /// Index of the texture request that becomes the active matcap
    #[arg(long, value_name = "INDEX", default_value_t = 5)]
    pub matcap_slot: usize,

    /// Texture URL or file path; repeat to replace the default matcap list
    #[arg(long = "texture", value_name = "URL|PATH")]
    pub textures: Vec<String>,

    /// Perlin noise seed
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    pub seed: u32,

    /// Initial window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Initial window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,

    /// Disable multisample anti-aliasing
    #[arg(long)]
    pub no_msaa: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_amplitude(value: &str) -> Result<f32, String> {
    let amplitude: f32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if AMPLITUDE_RANGE.contains(&amplitude) {
        Ok(amplitude)
    } else {
        Err(format!(
            "amplitude must be within {}..={}",
            AMPLITUDE_RANGE.start(),
            AMPLITUDE_RANGE.end()
        ))
    }
}

impl Args {
    pub fn surface_params(&self) -> SurfaceParams {
        SurfaceParams {
            resolution: self.resolution,
            amplitude: self.amplitude,
            noise_seed: self.seed,
            ..SurfaceParams::default()
        }
    }

    pub fn orbit_params(&self) -> OrbitParams {
        OrbitParams::default()
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            antialias: !self.no_msaa,
            preview_padding: self.preview_padding,
            ..RenderConfig::default()
        }
    }

    pub fn matcap_sources(&self) -> MatcapSources {
        let mut sources = MatcapSources {
            active_slot: self.matcap_slot,
            ..MatcapSources::default()
        };
        if !self.textures.is_empty() {
            sources.sources = self.textures.clone();
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["matcap-waves"]).unwrap();
        assert_eq!(args.amplitude, 1.0);
        assert_eq!(args.resolution, 12);
        assert_eq!(args.matcap_slot, 5);
        assert!(!args.no_msaa);

        let sources = args.matcap_sources();
        assert_eq!(sources.sources.len(), 7);
        assert_eq!(sources.active_slot, 5);
        assert!(args.render_config().antialias);
    }

    #[test]
    fn test_amplitude_out_of_range_rejected() {
        assert!(Args::try_parse_from(["matcap-waves", "--amplitude", "2"]).is_err());
        assert!(Args::try_parse_from(["matcap-waves", "--amplitude", "-0.1"]).is_err());
        assert!(Args::try_parse_from(["matcap-waves", "--amplitude", "abc"]).is_err());

        let args = Args::try_parse_from(["matcap-waves", "--amplitude", "1.5"]).unwrap();
        assert_eq!(args.surface_params().amplitude, 1.5);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        assert!(Args::try_parse_from(["matcap-waves", "--resolution", "0"]).is_err());
    }

    #[test]
    fn test_texture_overrides_replace_list() {
        let args = Args::try_parse_from([
            "matcap-waves",
            "--texture",
            "a.png",
            "--texture",
            "b.png",
            "--matcap-slot",
            "1",
        ])
        .unwrap();
        let sources = args.matcap_sources();
        assert_eq!(sources.sources, vec!["a.png".to_string(), "b.png".to_string()]);
        assert_eq!(sources.active_slot, 1);
    }
}
