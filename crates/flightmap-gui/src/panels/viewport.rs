use flightmap_core::config::{BasemapConfig, OverlayConfig};
use flightmap_core::consts::{MAX_MERCATOR_LAT, MIN_GRATICULE_SPACING_DEG};
use flightmap_core::kml::{KmlGeometry, KmlStyle, LineStyle, PolyStyle};
use flightmap_core::layer::KmlLayer;
use flightmap_core::overlay::OverlayKind;
use flightmap_core::projection::HALF_WORLD_M;
use geo_types::Coord;

use crate::app::FlightMapApp;
use crate::convert::to_color32;
use crate::states::MapState;

const POINT_RADIUS: f32 = 4.0;

pub fn show(ctx: &egui::Context, app: &mut FlightMapApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
            app.map.map_rect = Some(rect);

            handle_zoom(ui, &response, &mut app.map, rect);
            handle_pan(&response, &mut app.map);
            app.map.hover = response.hover_pos().map(|pos| {
                let offset = pos - rect.center();
                app.map.camera.geo_at([offset.x as f64, offset.y as f64])
            });

            let painter = ui.painter_at(rect);
            paint_basemap(&painter, &app.map, rect, &app.config.basemap);
            for layer in &app.map.layers {
                paint_layer(&painter, &app.map, rect, layer, &app.config.overlays);
            }
        });
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, map: &mut MapState, rect: egui::Rect) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }

    let factor = (scroll_delta as f64 * 0.005).exp();
    // Zoom toward mouse cursor
    let offset = ui
        .input(|i| i.pointer.hover_pos())
        .map(|pos| pos - rect.center())
        .unwrap_or(egui::Vec2::ZERO);
    map.zoom_at(offset, factor);
}

fn handle_pan(response: &egui::Response, map: &mut MapState) {
    if response.dragged_by(egui::PointerButton::Primary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        map.pan_by(response.drag_delta());
    }
}

fn paint_basemap(painter: &egui::Painter, map: &MapState, rect: egui::Rect, style: &BasemapConfig) {
    painter.rect_filled(rect, 0.0, to_color32(style.background));

    // The Mercator world is a square of side 2 * HALF_WORLD_M.
    let corner = |x: f64, y: f64| {
        let [dx, dy] = map.camera.to_screen_offset(Coord { x, y });
        rect.center() + egui::vec2(dx as f32, dy as f32)
    };
    let world = egui::Rect::from_two_pos(
        corner(-HALF_WORLD_M, HALF_WORLD_M),
        corner(HALF_WORLD_M, -HALF_WORLD_M),
    );
    painter.rect_filled(world, 0.0, to_color32(style.world));

    let stroke = egui::Stroke::new(1.0, to_color32(style.graticule));
    let step = style.graticule_spacing_deg.max(MIN_GRATICULE_SPACING_DEG);
    let top = map.to_screen(rect, Coord { x: 0.0, y: MAX_MERCATOR_LAT }).y;
    let bottom = map.to_screen(rect, Coord { x: 0.0, y: -MAX_MERCATOR_LAT }).y;

    let meridians = (360.0 / step).floor() as usize;
    for i in 0..=meridians {
        let lon = -180.0 + i as f64 * step;
        let x = map.to_screen(rect, Coord { x: lon, y: 0.0 }).x;
        if (rect.left()..=rect.right()).contains(&x) {
            painter.line_segment([egui::pos2(x, top), egui::pos2(x, bottom)], stroke);
        }
    }

    let parallels = (MAX_MERCATOR_LAT / step).ceil() as usize;
    for i in 0..parallels {
        let lat = i as f64 * step;
        for l in [lat, -lat] {
            let y = map.to_screen(rect, Coord { x: 0.0, y: l }).y;
            if (rect.top()..=rect.bottom()).contains(&y) {
                painter.line_segment([egui::pos2(world.left(), y), egui::pos2(world.right(), y)], stroke);
            }
        }
    }
}

fn default_style(kind: OverlayKind, config: &OverlayConfig) -> KmlStyle {
    match kind {
        OverlayKind::FlightPath => KmlStyle {
            line: Some(LineStyle {
                color: config.flight_path_color,
                width: config.flight_path_width,
            }),
            poly: Some(PolyStyle {
                color: config.flight_path_color,
                fill: false,
                outline: true,
            }),
        },
        OverlayKind::Coverage => KmlStyle {
            line: Some(LineStyle {
                color: config.coverage_stroke_color,
                width: config.coverage_width,
            }),
            poly: Some(PolyStyle {
                color: config.coverage_fill_color,
                fill: true,
                outline: true,
            }),
        },
    }
}

fn paint_layer(
    painter: &egui::Painter,
    map: &MapState,
    rect: egui::Rect,
    layer: &KmlLayer,
    config: &OverlayConfig,
) {
    let fallback = default_style(layer.kind, config);
    for placemark in &layer.document.placemarks {
        let style = layer.document.style_for(placemark);
        let line = style
            .and_then(|s| s.line)
            .or(fallback.line)
            .unwrap_or_default();
        let poly = style
            .and_then(|s| s.poly)
            .or(fallback.poly)
            .unwrap_or_default();
        let stroke = egui::Stroke::new(line.width, to_color32(line.color));

        for geometry in &placemark.geometries {
            match geometry {
                KmlGeometry::Point(p) => {
                    painter.circle_filled(map.to_screen(rect, p.0), POINT_RADIUS, stroke.color);
                }
                KmlGeometry::LineString(ls) => {
                    let points: Vec<egui::Pos2> =
                        ls.0.iter().map(|c| map.to_screen(rect, *c)).collect();
                    painter.add(egui::Shape::line(points, stroke));
                }
                KmlGeometry::Polygon(polygon) => {
                    let ring: Vec<egui::Pos2> = polygon
                        .exterior()
                        .0
                        .iter()
                        .map(|c| map.to_screen(rect, *c))
                        .collect();
                    // egui fills paths as convex shapes.
                    if poly.fill {
                        painter.add(egui::Shape::convex_polygon(
                            ring.clone(),
                            to_color32(poly.color),
                            egui::Stroke::NONE,
                        ));
                    }
                    if poly.outline {
                        painter.add(egui::Shape::closed_line(ring, stroke));
                        for hole in polygon.interiors() {
                            let points = hole.0.iter().map(|c| map.to_screen(rect, *c)).collect();
                            painter.add(egui::Shape::closed_line(points, stroke));
                        }
                    }
                }
            }
        }
    }
}
