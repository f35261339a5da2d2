use std::collections::VecDeque;

use super::model::FlowGraph;

/// 그래프 스냅샷 기반의 되돌리기/다시 실행 기록이다.
///
/// 되돌리기 스택의 맨 위는 항상 현재 그래프와 같은 상태를 가리키며,
/// 스냅샷이 하나뿐이면 더 이상 되돌리지 않는다.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<FlowGraph>,
    redo: Vec<FlowGraph>,
    capacity: usize,
}

impl History {
    /// 최대 `capacity`개의 스냅샷을 보관하는 기록을 생성한다.
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(capacity),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// 현재 그래프를 기록한다. 직전 스냅샷과 같으면 아무것도 하지 않는다.
    pub fn commit(&mut self, graph: &FlowGraph) -> bool {
        if self.undo.back() == Some(graph) {
            return false;
        }
        self.undo.push_back(graph.clone());
        self.redo.clear();
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        true
    }

    /// 한 단계 되돌린 뒤 복원할 그래프를 반환한다.
    pub fn undo(&mut self) -> Option<&FlowGraph> {
        if self.undo.len() <= 1 {
            return None;
        }
        let current = self.undo.pop_back()?;
        self.redo.push(current);
        self.undo.back()
    }

    /// 되돌린 단계를 다시 적용한 뒤 복원할 그래프를 반환한다.
    pub fn redo(&mut self) -> Option<&FlowGraph> {
        let next = self.redo.pop()?;
        self.undo.push_back(next);
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        self.undo.back()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// 보관 중인 되돌리기 스냅샷 개수.
    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }
}
