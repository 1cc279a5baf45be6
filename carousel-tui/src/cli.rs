use std::path::PathBuf;

use carousel_core::infra::{RuntimeConfig, SizeClass};
use clap::Parser;

/// Horizontally scrolling carousel of video thumbnails.
///
/// Left/Right (or h/l) select the neighbouring item, Enter plays the
/// centered one, r toggles the wide layout, q quits. Click a tile to bring
/// it to the center or drag the row to scroll.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "carousel", version, about, long_about = None)]
pub struct Cli {
    /// Use the wide layout (about five items across instead of three)
    #[arg(long)]
    pub regular: bool,

    /// Gap between items, in columns
    #[arg(long, value_name = "COLUMNS")]
    pub spacing: Option<f32>,

    /// Opacity of items one item width or more from the center (0..=1)
    #[arg(long, value_name = "OPACITY")]
    pub fade: Option<f32>,

    /// Scale of items one item width or more from the center (0..=1)
    #[arg(long, value_name = "FRACTION")]
    pub min_scale: Option<f32>,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn size_class(&self) -> SizeClass {
        if self.regular {
            SizeClass::Regular
        } else {
            SizeClass::Compact
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            item_spacing: self.spacing,
            minimum_opacity: self.fade,
            minimum_scale_fraction: self.min_scale,
            ..RuntimeConfig::default()
        }
    }
}
