/*
export.rs

Copyright 2025 Hervé Quatremain

This file is part of Variaine.

Variaine is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Variaine is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Variaine. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Export a palette.
//!
//! Two formats are available:
//!
//! * A PNG image where each cell is a square block of uniform color.
//! * A text file with one line per row and the colors of the row in hexadecimal notation,
//!   separated by tabulations.

use chrono::{DateTime, Local};
use image::{ImageFormat, RgbImage};
use log::debug;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::generator::palette::Palette;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Image,
    Text,
}

impl ExportFormat {
    /// File name extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Image => "png",
            ExportFormat::Text => "txt",
        }
    }
}

/// Build a file name from the current date and time, such as `palette-20250314-092653.png`.
pub fn default_file_name(format: ExportFormat) -> PathBuf {
    let now: DateTime<Local> = Local::now();
    PathBuf::from(format!(
        "palette-{}.{}",
        now.format("%Y%m%d-%H%M%S"),
        format.extension()
    ))
}

/// Save the palette as a PNG image. Each cell is a `multiplier` x `multiplier` block.
pub fn export_image(palette: &Palette, path: &Path, multiplier: u32) -> Result<(), Box<dyn Error>> {
    debug!("Exporting the palette image to {path:?}");
    let img: RgbImage = palette.create_image(multiplier);
    let file: File = File::create(path)?;
    let mut writer: BufWriter<File> = BufWriter::new(file);

    img.write_to(&mut writer, ImageFormat::Png)?;
    writer.flush()?;
    Ok(())
}

/// Save the palette as tab-separated hexadecimal colors.
pub fn export_text(palette: &Palette, path: &Path) -> Result<(), Box<dyn Error>> {
    debug!("Exporting the palette text to {path:?}");
    let file: File = File::create(path)?;
    let mut writer: BufWriter<File> = BufWriter::new(file);

    writer.write_all(palette.to_text().as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Rgb;
    use std::fs;

    fn palette() -> Palette {
        Palette::from_rows(
            (0..3u8)
                .map(|r| (0..3u8).map(|c| Rgb::from_bytes(r * 100, c * 100, 7)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("palette.txt");
        export_text(&palette(), &path).unwrap();
        let content: String = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "#000007\t#006407\t#00c807\n#640007\t#646407\t#64c807\n#c80007\t#c86407\t#c8c807"
        );
    }

    #[test]
    fn image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("palette.png");
        export_image(&palette(), &path, 10).unwrap();
        let img: RgbImage = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (30, 30));
        assert_eq!(img.get_pixel(25, 5).0, [0, 200, 7]);
        assert_eq!(img.get_pixel(5, 25).0, [200, 0, 7]);
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("missing").join("palette.txt");
        assert!(export_text(&palette(), &path).is_err());
        assert!(export_image(&palette(), &path, 1).is_err());
    }

    #[test]
    fn file_name() {
        let name: String = default_file_name(ExportFormat::Image)
            .to_string_lossy()
            .into_owned();
        assert!(name.starts_with("palette-"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "palette-YYYYmmdd-HHMMSS.png".len());
    }
}
