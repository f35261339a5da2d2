use super::model::{Connection, NodeKind, Position};

/// 포인터 입력이 가리키는 캔버스 위의 대상이다.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// 노드의 출력 핸들.
    Handle(String),
    /// 노드 본문.
    Node(String),
    /// 연결선의 클릭 영역.
    Connection(Connection),
    /// 빈 캔버스 배경.
    Background,
}

impl PointerTarget {
    /// 대상이 노드(본문 또는 핸들)이면 그 ID를 반환한다.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            PointerTarget::Handle(id) | PointerTarget::Node(id) => Some(id),
            _ => None,
        }
    }
}

/// 진행 중인 포인터 상호작용이다. 한 번에 하나의 상태만 활성화된다.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// 진행 중인 드래그가 없다.
    #[default]
    Idle,
    /// 노드를 끌어 옮기는 중이다.
    NodeDragging {
        /// 이동 중인 노드 ID.
        node_id: String,
        /// 노드 원점 기준 포인터 위치(월드 단위).
        grab_offset: Position,
    },
    /// 빈 배경을 끌어 뷰를 이동하는 중이다.
    Panning {
        /// 직전 포인터 화면 좌표.
        last_screen: Position,
    },
    /// 출력 핸들에서 연결선을 그리는 중이다.
    ConnectionDrawing {
        /// 출발 노드 ID.
        from_id: String,
        /// 미리보기 끝점의 월드 좌표.
        cursor: Position,
    },
    /// 팔레트에서 새 노드를 끌어오는 중이다.
    PlacingNode {
        /// 생성할 노드 유형.
        kind: NodeKind,
    },
}

impl InteractionState {
    /// 진행 중인 상호작용이 없는지 확인한다.
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// Idle 상태에서만 새 상호작용으로 전환한다. 전환 여부를 반환한다.
    pub fn begin(&mut self, next: InteractionState) -> bool {
        if !self.is_idle() {
            return false;
        }
        *self = next;
        true
    }

    /// 현재 상태를 종료하고 Idle로 돌아간 뒤 직전 상태를 반환한다.
    pub fn finish(&mut self) -> InteractionState {
        std::mem::take(self)
    }
}

/// 에디터가 처리하는 키 입력이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Z,
}

/// 키 입력과 함께 눌린 보조 키 상태이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    /// Shift 키.
    pub shift: bool,
    /// Ctrl(macOS에서는 Cmd) 키.
    pub command: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Idle이 아닐 때는 다른 상호작용을 시작할 수 없다.
    #[test]
    fn begin_requires_idle() {
        let mut state = InteractionState::Idle;
        assert!(state.begin(InteractionState::Panning {
            last_screen: Position::ZERO
        }));
        assert!(!state.begin(InteractionState::PlacingNode {
            kind: NodeKind::Task
        }));
        assert!(matches!(state, InteractionState::Panning { .. }));
    }

    /// 종료는 항상 Idle로 되돌리고 직전 상태를 넘겨준다.
    #[test]
    fn finish_resets_to_idle() {
        let mut state = InteractionState::ConnectionDrawing {
            from_id: "a".into(),
            cursor: Position::new(1.0, 2.0),
        };
        let previous = state.finish();
        assert!(state.is_idle());
        assert!(matches!(previous, InteractionState::ConnectionDrawing { .. }));
        assert!(state.finish().is_idle());
    }
}
