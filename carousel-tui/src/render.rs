//! Drawing carousel tiles into terminal cells.

use carousel_core::geometry::Frame;
use carousel_core::image::ImageState;
use carousel_core::presentation::TileView;
use ratatui::{
    layout::{Alignment, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Convert a frame in carousel units into the cells it covers inside
/// `area`, clipped to it. `None` when nothing is left after clipping.
pub fn to_cell_rect(frame: Frame, area: Rect) -> Option<Rect> {
    if frame.is_empty() {
        return None;
    }
    let left = (f32::from(area.x) + frame.x).round().max(f32::from(area.x));
    let right = (f32::from(area.x) + frame.max_x())
        .round()
        .min(f32::from(area.right()));
    let top = (f32::from(area.y) + frame.y).round().max(f32::from(area.y));
    let bottom = (f32::from(area.y) + frame.max_y())
        .round()
        .min(f32::from(area.bottom()));
    if right - left < 1.0 || bottom - top < 1.0 {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Dim `rgb` toward black by `opacity`.
fn faded(rgb: [u8; 3], opacity: f32) -> Color {
    let k = opacity.clamp(0.0, 1.0);
    let [r, g, b] = rgb.map(|c| (f32::from(c) * k).round() as u8);
    Color::Rgb(r, g, b)
}

fn tile_caption(tile: &TileView) -> Vec<Line<'static>> {
    let title_style = if tile.is_centered {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let marker = if tile.is_centered { "▶ " } else { "" };
    let status = match &tile.image {
        ImageState::Pending => "loading…",
        ImageState::Ready(_) => "",
        ImageState::Failed(_) => "no image",
        ImageState::Cancelled => "",
    };
    vec![
        Line::from(Span::styled(format!("{marker}{}", tile.item.title()), title_style)),
        Line::from(Span::styled(status, Style::default().fg(Color::DarkGray))),
    ]
}

/// Draw every tile whose scaled frame lands inside `area`.
pub fn render_tiles(f: &mut ratatui::Frame, area: Rect, tiles: &[TileView]) {
    for tile in tiles {
        let Some(rect) = to_cell_rect(tile.visual_frame(), area) else {
            continue;
        };

        let border_style = if tile.is_centered {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if tile.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut body = Style::default();
        if let Some(image) = tile.image.image() {
            body = body.bg(faded(image.average_rgb, tile.opacity));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if tile.is_centered {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .style(body);

        // Vertically center the caption.
        let inner_height = rect.height.saturating_sub(2);
        let pad = inner_height.saturating_sub(2) / 2;
        let mut lines = vec![Line::default(); pad as usize];
        lines.extend(tile_caption(tile));

        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            rect,
        );
    }
}
