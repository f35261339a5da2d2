use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ulid::Ulid;

use super::history::History;
use super::interaction::{EditorKey, InteractionState, KeyModifiers, PointerTarget};
use super::model::{
    ConnectOutcome, ConnectionCurve, EditorError, FlowGraph, FlowNode, NodeKind, Position,
};
use super::selection::Selection;
use super::validation::{ValidationIndicator, ValidationStatus, is_well_formed};
use super::viewport::ViewTransform;
use crate::document;
use crate::settings::EditorSettings;

/// 플로우차트 에디터의 모든 가변 상태를 소유하는 컨트롤러이다.
///
/// 렌더링 계층은 포인터/키보드/휠 입력을 이 타입의 메서드로 전달하고,
/// 그래프·뷰 변환·선택·검증 표시를 읽어 화면을 그린다.
#[derive(Debug, Clone)]
pub struct FlowEditorState {
    /// 현재 그래프.
    graph: FlowGraph,
    /// 월드↔화면 변환.
    view: ViewTransform,
    /// 현재 선택.
    selection: Selection,
    /// 진행 중인 포인터 상호작용.
    interaction: InteractionState,
    /// 되돌리기 기록.
    history: History,
    /// 검증 결과 표시기.
    validation: ValidationIndicator,
    /// 동작 설정.
    settings: EditorSettings,
    /// 캔버스 뷰포트 크기. 아직 그려지지 않았으면 `None`이다.
    viewport: Option<Position>,
    /// 뷰포트 크기를 알게 되면 뷰를 가운데로 맞출지 여부.
    pending_view_reset: bool,
    /// 다크 테마 여부.
    dark_mode: bool,
    /// 저장되지 않은 변경 여부.
    dirty: bool,
    /// 마지막으로 열거나 저장한 파일.
    current_file: Option<PathBuf>,
}

impl FlowEditorState {
    /// 빈 그래프로 에디터를 생성하고 초기 스냅샷을 기록한다.
    pub fn new(settings: EditorSettings) -> Self {
        let settings = settings.validated();
        let graph = FlowGraph::new();
        let mut history = History::new(settings.history_capacity);
        history.commit(&graph);
        let mut state = Self {
            graph,
            view: ViewTransform::new(settings.min_scale, settings.max_scale),
            selection: Selection::None,
            interaction: InteractionState::Idle,
            history,
            validation: ValidationIndicator::new(settings.validation_hold()),
            dark_mode: settings.dark_mode,
            settings,
            viewport: None,
            pending_view_reset: false,
            dirty: false,
            current_file: None,
        };
        state.reset_view();
        state
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn validation_status(&self) -> ValidationStatus {
        self.validation.status()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn current_file(&self) -> Option<&PathBuf> {
        self.current_file.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// 선택된 노드를 반환한다.
    pub fn selected_node(&self) -> Option<&FlowNode> {
        self.selection.node_id().and_then(|id| self.graph.node(id))
    }

    /// 다크/라이트 테마를 전환한다.
    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    // ---- 뷰 변환 ----

    /// 캔버스 뷰포트 크기를 갱신하고 미뤄둔 뷰 초기화를 처리한다.
    pub fn set_viewport(&mut self, size: Position) {
        self.viewport = Some(size);
        if self.pending_view_reset {
            self.reset_view();
        }
    }

    /// 배율을 1로, 월드 원점을 뷰포트 중앙으로 되돌린다.
    ///
    /// 뷰포트 크기를 아직 모르면 다음 `set_viewport` 호출까지 미룬다.
    pub fn reset_view(&mut self) {
        match self.viewport {
            Some(size) => {
                self.view.reset(size * 0.5);
                self.pending_view_reset = false;
            }
            None => {
                self.view.scale = 1.0;
                self.pending_view_reset = true;
            }
        }
    }

    /// 휠 입력으로 포인터 위치를 기준으로 확대/축소한다. 양수는 확대이다.
    pub fn zoom(&mut self, wheel_delta: f64, pointer: Position) {
        let factor = if wheel_delta > 0.0 {
            self.settings.zoom_in_factor
        } else if wheel_delta < 0.0 {
            self.settings.zoom_out_factor
        } else {
            return;
        };
        self.view.zoom_at(factor, pointer);
    }

    /// 임의 배율로 포인터 위치를 기준으로 확대/축소한다.
    pub fn zoom_by(&mut self, factor: f64, pointer: Position) {
        self.view.zoom_at(factor, pointer);
    }

    /// 화면 좌표 기준으로 뷰를 이동한다.
    pub fn pan(&mut self, delta: Position) {
        self.view.pan(delta);
    }

    // ---- 포인터 상호작용 ----

    /// 화면 좌표 아래의 대상을 핸들 → 노드 → 연결 → 배경 순으로 판정한다.
    pub fn hit_test(&self, screen: Position) -> PointerTarget {
        let world = self.view.screen_to_world(screen);
        let size = self.settings.node_size();
        if let Some(node) = self
            .graph
            .handle_at(world, size, self.settings.handle_radius)
        {
            return PointerTarget::Handle(node.id.clone());
        }
        if let Some(node) = self.graph.node_at(world, size) {
            return PointerTarget::Node(node.id.clone());
        }
        if let Some(conn) =
            self.graph
                .connection_at(world, size, self.settings.connection_hit_tolerance)
        {
            return PointerTarget::Connection(conn.clone());
        }
        PointerTarget::Background
    }

    /// 포인터 누름을 처리한다. 진행 중인 상호작용이 있으면 무시한다.
    pub fn pointer_down(&mut self, screen: Position, target: PointerTarget) {
        if !self.interaction.is_idle() {
            return;
        }
        let world = self.view.screen_to_world(screen);
        match target {
            PointerTarget::Handle(node_id) => {
                if self.graph.node(&node_id).is_some() {
                    self.interaction.begin(InteractionState::ConnectionDrawing {
                        from_id: node_id,
                        cursor: world,
                    });
                }
            }
            PointerTarget::Node(node_id) => {
                let Some(node) = self.graph.node(&node_id) else {
                    return;
                };
                let grab_offset = world - node.position;
                self.selection = Selection::Node(node_id.clone());
                self.interaction.begin(InteractionState::NodeDragging {
                    node_id,
                    grab_offset,
                });
            }
            PointerTarget::Connection(conn) => {
                self.selection = Selection::Connection(conn);
            }
            PointerTarget::Background => {
                self.selection = Selection::None;
                self.interaction.begin(InteractionState::Panning {
                    last_screen: screen,
                });
            }
        }
    }

    /// 포인터 이동을 현재 상호작용에 반영한다.
    pub fn pointer_move(&mut self, screen: Position) {
        let world = self.view.screen_to_world(screen);
        match &mut self.interaction {
            InteractionState::NodeDragging {
                node_id,
                grab_offset,
            } => {
                if let Some(node) = self.graph.node_mut(node_id) {
                    node.position = world - *grab_offset;
                }
            }
            InteractionState::Panning { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.view.pan(delta);
            }
            InteractionState::ConnectionDrawing { cursor, .. } => {
                *cursor = world;
            }
            InteractionState::PlacingNode { .. } | InteractionState::Idle => {}
        }
    }

    /// 포인터 놓음을 처리한다. 어떤 상태였든 Idle로 돌아간다.
    ///
    /// `target`은 놓은 위치의 대상이며, 연결 그리기를 끝낼 때만 사용한다.
    pub fn pointer_up(&mut self, target: &PointerTarget) {
        match self.interaction.finish() {
            InteractionState::NodeDragging { .. } => {
                self.commit();
            }
            InteractionState::ConnectionDrawing { from_id, .. } => {
                if let Some(to_id) = target.node_id() {
                    self.connect(&from_id, to_id);
                }
            }
            InteractionState::PlacingNode { kind } => {
                tracing::debug!(%kind, "캔버스 밖에서 놓아 노드 배치를 취소합니다.");
            }
            InteractionState::Panning { .. } | InteractionState::Idle => {}
        }
    }

    /// 두 노드를 연결한다. 자기 연결과 중복 연결은 조용히 무시한다.
    pub fn connect(&mut self, from_id: &str, to_id: &str) -> bool {
        match self.graph.add_connection(from_id, to_id) {
            ConnectOutcome::Added => {
                tracing::info!(from = from_id, to = to_id, "연결을 추가했습니다.");
                self.commit();
                true
            }
            outcome => {
                tracing::debug!(from = from_id, to = to_id, ?outcome, "연결 시도를 무시합니다.");
                false
            }
        }
    }

    // ---- 팔레트 배치 ----

    /// 팔레트에서 노드 유형을 끌기 시작한다.
    pub fn begin_placement(&mut self, kind: NodeKind) -> bool {
        self.interaction
            .begin(InteractionState::PlacingNode { kind })
    }

    /// 끌어온 노드를 화면 좌표 `screen`을 중심으로 생성한다.
    pub fn drop_node(&mut self, screen: Position) -> Option<String> {
        let kind = match &self.interaction {
            InteractionState::PlacingNode { kind } => *kind,
            _ => return None,
        };
        self.interaction.finish();
        let center = self.view.screen_to_world(screen);
        Some(self.create_node(kind, center))
    }

    /// 현재 뷰포트 중앙에 노드를 생성한다.
    pub fn add_node_at_center(&mut self, kind: NodeKind) -> String {
        let center = self
            .viewport
            .map(|size| self.view.screen_to_world(size * 0.5))
            .unwrap_or(Position::ZERO);
        self.create_node(kind, center)
    }

    /// `center`(월드 좌표)를 중심으로 새 노드를 만들고 스냅샷을 남긴다.
    fn create_node(&mut self, kind: NodeKind, center: Position) -> String {
        let id = self.generate_id();
        let position = center - self.settings.node_size() * 0.5;
        self.graph
            .add_node(FlowNode::new(id.clone(), kind, position));
        tracing::info!(%id, %kind, "노드를 추가했습니다.");
        self.commit();
        id
    }

    /// 기존 노드와 겹치지 않는 고유 ID를 생성한다.
    fn generate_id(&self) -> String {
        let ids: HashSet<&str> = self.graph.nodes.iter().map(|n| n.id.as_str()).collect();
        loop {
            let candidate = Ulid::new().to_string();
            if !ids.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }

    /// 연결 그리기 중이면 출발 핸들에서 커서까지의 미리보기 곡선을 반환한다.
    pub fn connection_preview(&self) -> Option<ConnectionCurve> {
        match &self.interaction {
            InteractionState::ConnectionDrawing { from_id, cursor } => {
                let from = self.graph.node(from_id)?;
                Some(ConnectionCurve::between(
                    from.output_anchor(self.settings.node_size()),
                    *cursor,
                ))
            }
            _ => None,
        }
    }

    // ---- 선택과 편집 ----

    /// 선택을 지정한다.
    pub fn select(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// 선택된 노드나 연결을 삭제한다. 삭제가 일어났는지 반환한다.
    pub fn delete_selected(&mut self) -> bool {
        match std::mem::take(&mut self.selection) {
            Selection::None => false,
            Selection::Node(id) => {
                if self.graph.remove_node(&id).is_some() {
                    tracing::info!(%id, "노드와 연결된 연결선을 삭제했습니다.");
                }
                self.commit();
                true
            }
            Selection::Connection(conn) => {
                if self.graph.remove_connection(&conn) {
                    tracing::info!(%conn, "연결을 삭제했습니다.");
                }
                self.commit();
                true
            }
        }
    }

    /// 선택된 노드를 월드 단위로 이동하고 스냅샷을 남긴다.
    pub fn nudge_selected(&mut self, delta: Position) -> bool {
        let Some(id) = self.selection.node_id() else {
            return false;
        };
        let Some(node) = self.graph.node_mut(id) else {
            return false;
        };
        node.position = node.position + delta;
        self.commit();
        true
    }

    /// 노드 제목을 수정한다.
    pub fn set_node_title(&mut self, id: &str, title: &str) -> Result<bool, EditorError> {
        let node = self.graph.require_node_mut(id)?;
        if node.title == title {
            return Ok(false);
        }
        node.title = title.to_string();
        Ok(self.commit())
    }

    /// 노드 설명을 수정한다.
    pub fn set_node_label(&mut self, id: &str, label: &str) -> Result<bool, EditorError> {
        let node = self.graph.require_node_mut(id)?;
        if node.label == label {
            return Ok(false);
        }
        node.label = label.to_string();
        Ok(self.commit())
    }

    /// 키 입력을 처리한다. 에디터가 소비했는지 반환한다.
    pub fn handle_key(&mut self, key: EditorKey, modifiers: KeyModifiers) -> bool {
        let step = if modifiers.shift {
            self.settings.nudge_step_large
        } else {
            self.settings.nudge_step
        };
        match key {
            EditorKey::Z if modifiers.command => {
                if modifiers.shift {
                    self.redo();
                } else {
                    self.undo();
                }
                true
            }
            EditorKey::Z => false,
            EditorKey::Delete | EditorKey::Backspace => self.delete_selected(),
            EditorKey::ArrowUp => self.nudge_selected(Position::new(0.0, -step)),
            EditorKey::ArrowDown => self.nudge_selected(Position::new(0.0, step)),
            EditorKey::ArrowLeft => self.nudge_selected(Position::new(-step, 0.0)),
            EditorKey::ArrowRight => self.nudge_selected(Position::new(step, 0.0)),
        }
    }

    // ---- 검증 ----

    /// 그래프를 검증하고 결과를 `now`부터 일정 시간 표시한다.
    pub fn validate_at(&mut self, now: Instant) -> bool {
        let valid = is_well_formed(&self.graph);
        tracing::info!(valid, nodes = self.graph.nodes.len(), "워크플로를 검증했습니다.");
        self.validation.show(valid, now);
        valid
    }

    /// 현재 시각 기준으로 검증한다.
    pub fn validate(&mut self) -> bool {
        self.validate_at(Instant::now())
    }

    /// 시간 경과를 반영한다. 검증 표시가 만료되면 `true`를 반환한다.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.validation.tick(now)
    }

    /// 검증 표시가 만료되기까지 남은 시간.
    pub fn validation_remaining(&self, now: Instant) -> Option<Duration> {
        self.validation.remaining(now)
    }

    // ---- 기록 ----

    /// 현재 그래프를 기록한다. 실제로 기록되었는지 반환한다.
    pub fn commit(&mut self) -> bool {
        let committed = self.history.commit(&self.graph);
        if committed {
            self.dirty = true;
            tracing::debug!(snapshots = self.history.len(), "스냅샷을 기록했습니다.");
        }
        committed
    }

    /// 한 단계 되돌린다.
    pub fn undo(&mut self) -> bool {
        let Some(graph) = self.history.undo() else {
            return false;
        };
        self.graph = graph.clone();
        self.after_restore();
        tracing::debug!(snapshots = self.history.len(), "되돌리기");
        true
    }

    /// 되돌린 단계를 다시 적용한다.
    pub fn redo(&mut self) -> bool {
        let Some(graph) = self.history.redo() else {
            return false;
        };
        self.graph = graph.clone();
        self.after_restore();
        tracing::debug!(snapshots = self.history.len(), "다시 실행");
        true
    }

    /// 복원 후 더 이상 존재하지 않는 대상을 가리키는 선택과 드래그를 정리한다.
    fn after_restore(&mut self) {
        self.interaction.finish();
        let stale = match &self.selection {
            Selection::None => false,
            Selection::Node(id) => self.graph.node(id).is_none(),
            Selection::Connection(conn) => !self.graph.has_connection(&conn.from, &conn.to),
        };
        if stale {
            self.selection = Selection::None;
        }
        self.dirty = true;
    }

    // ---- 문서 ----

    /// 그래프 전체를 교체하고 스냅샷을 하나 남긴다.
    pub fn load_graph(&mut self, mut graph: FlowGraph, path: Option<PathBuf>) {
        let pruned = graph.prune_connections();
        if pruned > 0 {
            tracing::warn!(pruned, "끊어지거나 중복된 연결을 제외했습니다.");
        }
        tracing::info!(
            nodes = graph.nodes.len(),
            connections = graph.connections.len(),
            "워크플로를 불러왔습니다."
        );
        self.graph = graph;
        self.selection = Selection::None;
        self.interaction.finish();
        self.validation.clear();
        self.reset_view();
        self.history.commit(&self.graph);
        self.dirty = false;
        self.current_file = path;
    }

    /// JSON 문서를 불러온다. 잘못된 문서는 빈 그래프로 대체된다.
    pub fn load_document(&mut self, json: &str, path: Option<PathBuf>) {
        let graph = document::import_graph(json);
        self.load_graph(graph, path);
    }

    /// 현재 그래프를 JSON 문서로 내보낸다.
    pub fn export_document(&self) -> Result<String, EditorError> {
        document::export_graph(&self.graph)
    }

    /// 저장 완료를 기록한다.
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.current_file = Some(path);
        self.dirty = false;
    }
}

impl Default for FlowEditorState {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::model::Connection;

    const VIEWPORT: Position = Position::new(800.0, 600.0);

    fn close(a: Position, b: Position) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn editor() -> FlowEditorState {
        let mut state = FlowEditorState::default();
        state.set_viewport(VIEWPORT);
        state
    }

    /// 팔레트 드래그로 노드를 놓고 생성된 ID를 반환한다.
    fn place(state: &mut FlowEditorState, kind: NodeKind, screen: Position) -> String {
        assert!(state.begin_placement(kind));
        let id = state.drop_node(screen).expect("노드 생성 실패");
        state.pointer_up(&PointerTarget::Background);
        id
    }

    /// 핸들에서 대상 노드까지 끌어 연결한다.
    fn drag_connect(state: &mut FlowEditorState, from: &str, to: &str) {
        let size = state.settings().node_size();
        let from_anchor = state.graph().node(from).map(|n| n.output_anchor(size));
        let to_center = state.graph().node(to).map(|n| n.position + size * 0.5);
        let (Some(from_anchor), Some(to_center)) = (from_anchor, to_center) else {
            panic!("노드가 없습니다");
        };
        let down = state.view().world_to_screen(from_anchor);
        let up = state.view().world_to_screen(to_center);
        state.pointer_down(down, PointerTarget::Handle(from.to_string()));
        state.pointer_move(up);
        let target = state.hit_test(up);
        state.pointer_up(&target);
    }

    /// 뷰포트가 없으면 뷰 초기화가 미뤄졌다가 크기를 알게 되면 적용된다.
    #[test]
    fn reset_view_is_deferred_until_viewport_known() {
        let mut state = FlowEditorState::default();
        assert_eq!(state.view().translate, Position::ZERO);
        state.set_viewport(VIEWPORT);
        assert_eq!(state.view().translate, Position::new(400.0, 300.0));
        assert_eq!(state.view().scale, 1.0);
        state.pan(Position::new(30.0, 30.0));
        state.set_viewport(VIEWPORT);
        assert_eq!(state.view().translate, Position::new(430.0, 330.0));
    }

    /// 놓은 지점을 중심으로 노드가 생성되고 스냅샷이 하나 추가된다.
    #[test]
    fn drop_creates_centered_node_with_snapshot() {
        let mut state = editor();
        let id = place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        let node = state.graph().node(&id).expect("노드 없음");
        assert_eq!(node.position, Position::new(-110.0, -50.0));
        assert_eq!(node.title, "New Task");
        assert!(state.can_undo());
        assert!(state.is_dirty());
        assert!(state.interaction().is_idle());
    }

    /// 배치 중이 아니면 놓기는 아무것도 만들지 않는다.
    #[test]
    fn drop_without_placement_is_ignored() {
        let mut state = editor();
        assert!(state.drop_node(Position::ZERO).is_none());
        assert!(state.graph().is_empty());
    }

    /// 노드를 끌면 잡은 지점이 커서를 따라가고 놓을 때 한 번만 기록된다.
    #[test]
    fn dragging_node_follows_cursor_and_commits_once() {
        let mut state = editor();
        let id = place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        let grab = Position::new(350.0, 280.0);
        assert_eq!(state.hit_test(grab), PointerTarget::Node(id.clone()));
        state.pointer_down(grab, PointerTarget::Node(id.clone()));
        assert_eq!(state.selection(), &Selection::Node(id.clone()));
        state.pointer_move(Position::new(360.0, 290.0));
        state.pointer_move(Position::new(450.0, 330.0));
        assert_eq!(state.history.len(), 2);
        state.pointer_up(&PointerTarget::Background);
        assert_eq!(state.history.len(), 3);
        let node = state.graph().node(&id).expect("노드 없음");
        assert!(close(node.position, Position::new(-10.0, 0.0)));
    }

    /// 확대된 상태에서도 잡은 오프셋이 유지된다.
    #[test]
    fn drag_offset_respects_scale() {
        let mut state = editor();
        let id = place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        state.zoom(1.0, Position::new(100.0, 100.0));
        let node_pos = state.graph().node(&id).map(|n| n.position).expect("노드 없음");
        let grab_world = node_pos + Position::new(20.0, 10.0);
        let grab = state.view().world_to_screen(grab_world);
        state.pointer_down(grab, PointerTarget::Node(id.clone()));
        state.pointer_move(grab + Position::new(55.0, 0.0));
        state.pointer_up(&PointerTarget::Background);
        let moved = state.graph().node(&id).map(|n| n.position).expect("노드 없음");
        let expected = node_pos + Position::new(55.0 / state.view().scale, 0.0);
        assert!(close(moved, expected), "{moved:?} vs {expected:?}");
    }

    /// 배경을 누르면 선택이 해제되고 끌면 뷰가 이동한다.
    #[test]
    fn background_drag_pans_and_deselects() {
        let mut state = editor();
        let id = place(&mut state, NodeKind::Start, Position::new(400.0, 300.0));
        state.select(Selection::Node(id));
        state.pointer_down(Position::new(10.0, 10.0), PointerTarget::Background);
        assert!(state.selection().is_none());
        state.pointer_move(Position::new(30.0, 5.0));
        state.pointer_move(Position::new(40.0, 15.0));
        state.pointer_up(&PointerTarget::Background);
        assert_eq!(state.view().translate, Position::new(430.0, 305.0));
        assert_eq!(state.history.len(), 2);
    }

    /// 핸들에서 다른 노드로 끌면 연결이 하나 생기고 같은 쌍은 다시 생기지 않는다.
    #[test]
    fn connection_drawing_commits_unique_pair() {
        let mut state = editor();
        let a = place(&mut state, NodeKind::Start, Position::new(200.0, 300.0));
        let b = place(&mut state, NodeKind::End, Position::new(600.0, 300.0));
        drag_connect(&mut state, &a, &b);
        drag_connect(&mut state, &a, &b);
        assert_eq!(state.graph().connections, vec![Connection::new(a.clone(), b.clone())]);
        assert_eq!(state.history.len(), 4);
    }

    /// 자기 자신이나 빈 곳에서 끝난 연결 그리기는 버려진다.
    #[test]
    fn invalid_connection_attempts_are_discarded() {
        let mut state = editor();
        let a = place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        let snapshots = state.history.len();
        drag_connect(&mut state, &a, &a);
        let size = state.settings().node_size();
        let anchor = state.graph().node(&a).map(|n| n.output_anchor(size)).expect("노드 없음");
        let down = state.view().world_to_screen(anchor);
        state.pointer_down(down, PointerTarget::Handle(a.clone()));
        assert!(state.connection_preview().is_some());
        state.pointer_move(Position::new(790.0, 590.0));
        state.pointer_up(&PointerTarget::Background);
        assert!(state.graph().connections.is_empty());
        assert_eq!(state.history.len(), snapshots);
        assert!(state.connection_preview().is_none());
    }

    /// 다른 상호작용 중에는 새 드래그를 시작하지 않는다.
    #[test]
    fn pointer_down_requires_idle() {
        let mut state = editor();
        assert!(state.begin_placement(NodeKind::Task));
        state.pointer_down(Position::ZERO, PointerTarget::Background);
        assert!(matches!(state.interaction(), InteractionState::PlacingNode { .. }));
        state.pointer_up(&PointerTarget::Background);
        assert!(state.interaction().is_idle());
        assert!(state.graph().is_empty());
    }

    /// 노드 삭제는 연결을 함께 지우고 스냅샷을 남긴다.
    #[test]
    fn delete_selected_node_cascades() {
        let mut state = editor();
        let a = place(&mut state, NodeKind::Start, Position::new(100.0, 300.0));
        let b = place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        let c = place(&mut state, NodeKind::End, Position::new(700.0, 300.0));
        state.connect(&a, &b);
        state.connect(&b, &c);
        state.connect(&a, &c);
        state.select(Selection::Node(b.clone()));
        assert!(state.handle_key(EditorKey::Delete, KeyModifiers::default()));
        assert!(state.graph().node(&b).is_none());
        assert_eq!(state.graph().connections, vec![Connection::new(a, c)]);
        assert!(state.selection().is_none());
        assert!(!state.delete_selected());
    }

    /// 연결 삭제는 선택한 순서쌍만 지운다.
    #[test]
    fn delete_selected_connection() {
        let mut state = editor();
        let a = place(&mut state, NodeKind::Start, Position::new(100.0, 300.0));
        let b = place(&mut state, NodeKind::End, Position::new(600.0, 500.0));
        state.connect(&a, &b);
        state.connect(&b, &a);
        let forward = Connection::new(a.clone(), b.clone());
        let size = state.settings().node_size();
        let on_curve = state
            .graph()
            .connection_curve(&forward, size)
            .map(|curve| curve.point_at(0.25))
            .expect("곡선 없음");
        let screen = state.view().world_to_screen(on_curve);
        let target = state.hit_test(screen);
        assert_eq!(target, PointerTarget::Connection(forward));
        state.pointer_down(screen, target);
        assert!(state.interaction().is_idle());
        assert!(state.handle_key(EditorKey::Backspace, KeyModifiers::default()));
        assert_eq!(state.graph().connections, vec![Connection::new(b, a)]);
    }

    /// 방향키는 선택된 노드를 10, Shift와 함께면 50만큼 옮긴다.
    #[test]
    fn arrow_keys_nudge_selected_node() {
        let mut state = editor();
        let id = place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        assert!(!state.handle_key(EditorKey::ArrowUp, KeyModifiers::default()));
        state.select(Selection::Node(id.clone()));
        let before = state.history.len();
        state.handle_key(EditorKey::ArrowRight, KeyModifiers::default());
        state.handle_key(
            EditorKey::ArrowUp,
            KeyModifiers {
                shift: true,
                command: false,
            },
        );
        let node = state.graph().node(&id).expect("노드 없음");
        assert_eq!(node.position, Position::new(-100.0, -100.0));
        assert_eq!(state.history.len(), before + 2);
    }

    /// Ctrl+Z와 Ctrl+Shift+Z가 되돌리기/다시 실행으로 동작한다.
    #[test]
    fn undo_redo_round_trip_via_keys() {
        let mut state = editor();
        let a = place(&mut state, NodeKind::Start, Position::new(100.0, 300.0));
        let b = place(&mut state, NodeKind::End, Position::new(600.0, 300.0));
        state.connect(&a, &b);
        let before_undo = state.graph().clone();
        let ctrl = KeyModifiers {
            shift: false,
            command: true,
        };
        let ctrl_shift = KeyModifiers {
            shift: true,
            command: true,
        };
        assert!(state.handle_key(EditorKey::Z, ctrl));
        assert!(state.graph().connections.is_empty());
        assert!(state.handle_key(EditorKey::Z, ctrl_shift));
        assert_eq!(state.graph(), &before_undo);
        assert!(!state.handle_key(EditorKey::Z, KeyModifiers::default()));
    }

    /// 초기 상태 아래로는 되돌리지 않는다.
    #[test]
    fn undo_stops_at_initial_snapshot() {
        let mut state = editor();
        place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        assert!(state.undo());
        assert!(state.graph().is_empty());
        assert!(!state.undo());
        assert!(state.redo());
        assert_eq!(state.graph().nodes.len(), 1);
    }

    /// 스냅샷이 용량을 넘으면 되돌리기는 최대 29번까지만 가능하다.
    #[test]
    fn undo_depth_is_bounded_by_capacity() {
        let mut state = editor();
        let id = place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        state.select(Selection::Node(id));
        for _ in 0..40 {
            assert!(state.nudge_selected(Position::new(1.0, 0.0)));
        }
        let mut undone = 0;
        while state.undo() {
            undone += 1;
        }
        assert_eq!(undone, 29);
        assert!(!state.can_undo());
        assert!(state.can_redo());
    }

    /// 휠 변화량이 0이면 뷰가 바뀌지 않고, 양수면 1.1배 확대된다.
    #[test]
    fn zero_wheel_delta_is_a_no_op() {
        let mut state = editor();
        let before = *state.view();
        state.zoom(0.0, Position::new(120.0, 80.0));
        assert_eq!(state.view(), &before);
        state.zoom(3.0, Position::new(120.0, 80.0));
        assert!((state.view().scale - 1.1).abs() < 1e-9);
        state.zoom(-3.0, Position::new(120.0, 80.0));
        assert!((state.view().scale - 0.99).abs() < 1e-9);
    }

    /// 되돌리기로 사라진 노드에 대한 선택은 해제된다.
    #[test]
    fn undo_clears_stale_selection() {
        let mut state = editor();
        let id = place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        state.select(Selection::Node(id));
        state.undo();
        assert!(state.selection().is_none());
    }

    /// 제목과 설명 수정은 각각 스냅샷을 남기고 같은 값은 무시된다.
    #[test]
    fn field_edits_commit_per_change() {
        let mut state = editor();
        let id = place(&mut state, NodeKind::Decision, Position::new(400.0, 300.0));
        let before = state.history.len();
        assert!(matches!(state.set_node_title(&id, "Approve?"), Ok(true)));
        assert!(matches!(state.set_node_label(&id, "Manager decides"), Ok(true)));
        assert!(matches!(state.set_node_title(&id, "Approve?"), Ok(false)));
        assert_eq!(state.history.len(), before + 2);
        assert!(matches!(
            state.set_node_title("missing", "x"),
            Err(EditorError::UnknownNode(_))
        ));
        assert_eq!(state.selected_node().map(|n| n.id.clone()), None);
    }

    /// 검증 결과는 3초 뒤 Unknown으로 돌아간다.
    #[test]
    fn validation_result_reverts_after_delay() {
        let mut state = editor();
        let now = Instant::now();
        assert!(!state.validate_at(now));
        assert_eq!(state.validation_status(), ValidationStatus::Invalid);
        let s = place(&mut state, NodeKind::Start, Position::new(100.0, 300.0));
        let e = place(&mut state, NodeKind::End, Position::new(600.0, 300.0));
        state.connect(&s, &e);
        assert!(state.validate_at(now + Duration::from_secs(1)));
        assert!(!state.tick(now + Duration::from_secs(3)));
        assert_eq!(state.validation_status(), ValidationStatus::Valid);
        assert!(state.tick(now + Duration::from_secs(4)));
        assert_eq!(state.validation_status(), ValidationStatus::Unknown);
    }

    /// 잘못된 문서를 불러오면 빈 그래프가 되고 스냅샷이 남는다.
    #[test]
    fn malformed_document_loads_empty_graph() {
        let mut state = editor();
        place(&mut state, NodeKind::Task, Position::new(400.0, 300.0));
        state.load_document("not json", None);
        assert!(state.graph().is_empty());
        assert!(state.graph().connections.is_empty());
        assert!(!state.is_dirty());
        assert!(state.undo());
        assert_eq!(state.graph().nodes.len(), 1);
    }

    /// 문서를 불러오면 뷰가 초기화되고 끊어진 연결은 제외된다.
    #[test]
    fn load_resets_view_and_prunes_dangling_connections() {
        let mut state = editor();
        state.zoom(1.0, Position::new(10.0, 10.0));
        let json = r#"{
            "nodes": [
                {"id": "s", "type": "Start", "title": "S", "label": "", "position": {"x": 0, "y": 0}}
            ],
            "connections": [{"from": "s", "to": "ghost"}]
        }"#;
        state.load_document(json, Some(PathBuf::from("flow.json")));
        assert_eq!(state.graph().nodes.len(), 1);
        assert!(state.graph().connections.is_empty());
        assert_eq!(state.view().scale, 1.0);
        assert_eq!(state.view().translate, Position::new(400.0, 300.0));
        assert_eq!(state.current_file(), Some(&PathBuf::from("flow.json")));
    }

    /// 내보낸 문서를 다시 불러오면 같은 그래프가 된다.
    #[test]
    fn export_then_load_preserves_graph() {
        let mut state = editor();
        let a = place(&mut state, NodeKind::Start, Position::new(123.5, 321.25));
        let b = place(&mut state, NodeKind::End, Position::new(640.0, 77.0));
        state.connect(&a, &b);
        let json = state.export_document().expect("내보내기 실패");
        let original = state.graph().clone();
        let mut other = editor();
        other.load_document(&json, None);
        assert_eq!(other.graph(), &original);
    }

    /// 팔레트 클릭은 뷰포트 중앙에 노드를 만든다.
    #[test]
    fn palette_click_adds_node_at_viewport_center() {
        let mut state = editor();
        state.pan(Position::new(100.0, 0.0));
        let id = state.add_node_at_center(NodeKind::End);
        let node = state.graph().node(&id).expect("노드 없음");
        assert_eq!(node.position, Position::new(-210.0, -50.0));
    }
}
