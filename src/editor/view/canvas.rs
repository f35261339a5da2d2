use super::*;
use crate::editor::interaction::PointerTarget;
use eframe::epaint::CubicBezierShape;

/// 배경 격자 간격(월드 단위).
const GRID_SPACING: f32 = 40.0;
/// 노드 헤더 높이(월드 단위).
const HEADER_HEIGHT: f32 = 34.0;

impl<'a> FlowBuilderUi<'a> {
    /// 캔버스를 렌더링하고 포인터/휠 입력을 에디터 상태로 전달한다.
    pub(super) fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let (rect, _response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        self.get_state_mut()
            .set_viewport(Position::from(rect.size()));
        let hovered = self.handle_canvas_input(ui, rect);

        let painter = ui.painter_at(rect);
        self.draw_grid(&painter, rect);
        self.draw_connections(&painter, rect.min, hovered.as_ref());
        self.draw_preview(&painter, rect.min);
        for node in &self.get_state().graph().nodes {
            self.draw_node(&painter, rect.min, node, hovered.as_ref());
        }
        self.draw_placement_ghost(ui.ctx());
        self.update_cursor(ui);
    }

    /// 포인터와 휠 입력을 처리하고, 대기 중일 때 포인터 아래의 대상을 반환한다.
    fn handle_canvas_input(&mut self, ui: &egui::Ui, rect: egui::Rect) -> Option<PointerTarget> {
        let (pressed, released, latest, scroll_y, zoom_delta) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
                i.raw_scroll_delta.y,
                i.zoom_delta(),
            )
        });
        let over_canvas = ui.rect_contains_pointer(rect);
        let local = latest.map(|pos| Position::from(pos - rect.min));
        let state = self.get_state_mut();

        if pressed && over_canvas {
            if let Some(point) = local {
                let target = state.hit_test(point);
                state.pointer_down(point, target);
            }
        }
        if let Some(point) = local {
            if !state.interaction().is_idle() {
                state.pointer_move(point);
            }
        }
        if released {
            let target = match local {
                Some(point) if over_canvas => {
                    state.drop_node(point);
                    state.hit_test(point)
                }
                _ => PointerTarget::Background,
            };
            state.pointer_up(&target);
        }
        if over_canvas {
            if let Some(point) = local {
                if zoom_delta != 1.0 {
                    state.zoom_by(f64::from(zoom_delta), point);
                } else if scroll_y != 0.0 {
                    state.zoom(f64::from(scroll_y), point);
                }
            }
        }

        match local {
            Some(point) if over_canvas && state.interaction().is_idle() => {
                Some(state.hit_test(point))
            }
            _ => None,
        }
    }

    /// 월드 좌표를 캔버스 기준 화면 좌표로 변환한다.
    fn to_screen(&self, origin: egui::Pos2, world: Position) -> egui::Pos2 {
        let local = self.get_state().view().world_to_screen(world);
        origin + egui::Pos2::from(local).to_vec2()
    }

    /// 현재 확대 비율을 egui 단위로 반환한다.
    fn scale(&self) -> f32 {
        self.get_state().view().scale as f32
    }

    /// 현재 배율에서 노드 하나가 차지하는 화면 크기.
    fn node_extent(&self) -> egui::Vec2 {
        let size = self.get_state().settings().node_size();
        egui::vec2(size.x as f32, size.y as f32) * self.scale()
    }

    /// 뷰 변환을 따라 움직이는 점 격자를 그린다.
    fn draw_grid(&self, painter: &egui::Painter, rect: egui::Rect) {
        let view = self.get_state().view();
        let spacing = GRID_SPACING * self.scale();
        if spacing < 8.0 {
            return;
        }
        let color = self.get_theme().palette().grid_dot;
        let start_x = rect.min.x + (view.translate.x as f32).rem_euclid(spacing);
        let start_y = rect.min.y + (view.translate.y as f32).rem_euclid(spacing);
        let mut y = start_y;
        while y < rect.max.y {
            let mut x = start_x;
            while x < rect.max.x {
                painter.circle_filled(egui::pos2(x, y), 1.5, color);
                x += spacing;
            }
            y += spacing;
        }
    }

    /// 확정된 연결선을 화살표와 함께 그린다.
    fn draw_connections(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        hovered: Option<&PointerTarget>,
    ) {
        let state = self.get_state();
        let scale = self.scale();
        let palette = self.get_theme().palette();
        let size = state.settings().node_size();
        for conn in &state.graph().connections {
            let Some(curve) = state.graph().connection_curve(conn, size) else {
                continue;
            };
            let highlighted = state.selection().connection() == Some(conn)
                || matches!(hovered, Some(PointerTarget::Connection(c)) if c == conn);
            let color = if highlighted {
                self.get_theme().accent
            } else {
                palette.connection_stroke
            };
            let points = curve.points.map(|p| self.to_screen(origin, p));
            painter.add(CubicBezierShape::from_points_stroke(
                points,
                false,
                egui::Color32::TRANSPARENT,
                Stroke::new((3.0 * scale).max(1.0), color),
            ));
            self.draw_arrow_head(painter, origin, &curve, color);
        }
    }

    /// 곡선 끝에 진행 방향을 향하는 화살표 머리를 그린다.
    fn draw_arrow_head(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        curve: &ConnectionCurve,
        color: egui::Color32,
    ) {
        let tip = self.to_screen(origin, curve.point_at(1.0));
        let before = self.to_screen(origin, curve.point_at(0.95));
        let dir = (tip - before).normalized();
        if !dir.x.is_finite() || !dir.y.is_finite() {
            return;
        }
        let len = 10.0 * self.scale();
        let normal = egui::vec2(-dir.y, dir.x);
        let base = tip - dir * len;
        painter.add(egui::Shape::convex_polygon(
            vec![tip, base + normal * (len * 0.5), base - normal * (len * 0.5)],
            color,
            Stroke::NONE,
        ));
    }

    /// 연결 그리기 중인 점선 미리보기를 그린다.
    fn draw_preview(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let Some(curve) = self.get_state().connection_preview() else {
            return;
        };
        let scale = self.scale();
        let points: Vec<egui::Pos2> = curve
            .sample(48)
            .into_iter()
            .map(|p| self.to_screen(origin, p))
            .collect();
        painter.extend(egui::Shape::dashed_line(
            &points,
            Stroke::new((2.0 * scale).max(1.0), self.get_theme().palette().fg_text_secondary),
            5.0 * scale,
            5.0 * scale,
        ));
    }

    /// 개별 노드를 그린다.
    fn draw_node(
        &self,
        painter: &egui::Painter,
        origin: egui::Pos2,
        node: &FlowNode,
        hovered: Option<&PointerTarget>,
    ) {
        let state = self.get_state();
        let theme = self.get_theme();
        let palette = theme.palette();
        let scale = self.scale();
        let size = state.settings().node_size();
        let accent = theme.node_accent(node.kind);
        let selected = state.selection().node_id() == Some(node.id.as_str());
        let is_hovered = hovered.and_then(|t| t.node_id()) == Some(node.id.as_str());

        let rect = egui::Rect::from_min_size(
            self.to_screen(origin, node.position),
            self.node_extent(),
        );
        let rounding = 12.0 * scale;
        painter.rect_filled(rect, rounding, palette.node_fill);

        let header = egui::Rect::from_min_size(
            rect.min,
            egui::vec2(rect.width(), HEADER_HEIGHT * scale),
        );
        painter.rect_filled(
            header,
            egui::Rounding {
                nw: rounding,
                ne: rounding,
                sw: 0.0,
                se: 0.0,
            },
            palette.node_header,
        );
        let strip = egui::Rect::from_min_size(rect.min, egui::vec2(6.0 * scale, rect.height()));
        painter.rect_filled(
            strip,
            egui::Rounding {
                nw: rounding,
                sw: rounding,
                ne: 0.0,
                se: 0.0,
            },
            accent,
        );
        let border = if selected {
            Stroke::new(2.5, accent)
        } else if is_hovered {
            Stroke::new(1.5, blend_color(palette.node_border, accent, 0.5))
        } else {
            Stroke::new(1.5, palette.node_border)
        };
        painter.rect_stroke(rect, rounding, border);

        let pad = 14.0 * scale;
        painter.text(
            header.left_center() + egui::vec2(pad, 0.0),
            egui::Align2::LEFT_CENTER,
            format!("{} {}", theme.node_icon(node.kind), node.kind.as_str().to_uppercase()),
            egui::FontId::proportional(11.0 * scale),
            accent,
        );
        let title_pos = egui::pos2(rect.min.x + pad, header.max.y + 10.0 * scale);
        painter.text(
            title_pos,
            egui::Align2::LEFT_TOP,
            ellipsize(&node.title, 24),
            egui::FontId::proportional(15.0 * scale),
            palette.fg_text_primary,
        );
        painter.text(
            title_pos + egui::vec2(0.0, 22.0 * scale),
            egui::Align2::LEFT_TOP,
            ellipsize(node.label.lines().next().unwrap_or_default(), 30),
            egui::FontId::proportional(12.5 * scale),
            palette.fg_text_secondary,
        );

        let handle = self.to_screen(origin, node.output_anchor(size));
        let radius = state.settings().handle_radius as f32 * scale;
        painter.circle_filled(handle, radius, accent);
        painter.circle_stroke(handle, radius, Stroke::new(3.0 * scale, palette.node_fill));
    }

    /// 팔레트에서 끌고 있는 노드의 윤곽을 포인터 위치에 그린다.
    fn draw_placement_ghost(&self, ctx: &egui::Context) {
        let InteractionState::PlacingNode { kind } = self.get_state().interaction() else {
            return;
        };
        let Some(pointer) = ctx.input(|i| i.pointer.latest_pos()) else {
            return;
        };
        let scale = self.scale();
        let rect = egui::Rect::from_center_size(pointer, self.node_extent());
        let accent = self.get_theme().node_accent(*kind);
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Tooltip,
            egui::Id::new("flow_palette_ghost"),
        ));
        painter.rect(
            rect,
            12.0 * scale,
            accent.gamma_multiply(0.15),
            Stroke::new(1.5, accent),
        );
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            kind.default_title(),
            egui::FontId::proportional(14.0 * scale),
            accent,
        );
    }

    /// 진행 중인 상호작용에 맞는 커서 모양을 지정한다.
    fn update_cursor(&self, ui: &egui::Ui) {
        let icon = match self.get_state().interaction() {
            InteractionState::Panning { .. } => egui::CursorIcon::Grabbing,
            InteractionState::NodeDragging { .. } => egui::CursorIcon::Move,
            InteractionState::ConnectionDrawing { .. } => egui::CursorIcon::Crosshair,
            InteractionState::PlacingNode { .. } => egui::CursorIcon::Grabbing,
            InteractionState::Idle => return,
        };
        ui.output_mut(|o| o.cursor_icon = icon);
    }
}

/// 최대 글자 수를 넘으면 말줄임표로 자른다.
fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
