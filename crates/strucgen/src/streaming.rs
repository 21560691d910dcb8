//! NDJSON streaming events for generation progress.
//!
//! Emits progress events to stderr for agent consumption.
//!
//! Event types:
//!   - generation_started: Initial configuration
//!   - atom_placed: Individual placement progress
//!   - fallback_engaged: Sparse-bin fallback latched
//!   - generation_complete: Final result envelope
//!   - error: Terminal failure

#[derive(Debug, Clone)]
pub struct GenerationStartedEvent {
    pub num_atoms: usize,
    pub box_size: [f32; 3],
    pub output_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AtomPlacedEvent {
    pub atom_index: usize,
    pub total_atoms: usize,
    pub element: String,
}

#[derive(Debug, Clone)]
pub struct FallbackEngagedEvent {
    pub attempts: usize,
    pub placed: usize,
}

#[derive(Debug, Clone)]
pub struct GenerationCompleteEvent {
    pub total_atoms: usize,
    pub box_size: [f32; 3],
    pub attempts: usize,
    pub elapsed_ms: u64,
}

/// Streaming emitter for NDJSON events.
///
/// Emits events to stderr when enabled, keeping stdout free for the final
/// summary output.
#[derive(Debug, Clone, Copy)]
pub struct StreamEmitter {
    enabled: bool,
}

impl StreamEmitter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn emit_json(&self, json: &str) {
        if self.enabled {
            eprintln!("{}", json);
        }
    }

    pub fn emit_generation_started(&self, event: &GenerationStartedEvent) {
        let json = format!(
            r#"{{"event":"generation_started","num_atoms":{},"box_size":[{},{},{}],"output_path":{}}}"#,
            event.num_atoms,
            event.box_size[0],
            event.box_size[1],
            event.box_size[2],
            serde_json::to_string(&event.output_path).unwrap_or("null".to_string())
        );
        self.emit_json(&json);
    }

    pub fn emit_atom_placed(&self, event: &AtomPlacedEvent) {
        let placed = event.atom_index + 1;
        let progress_pct = if event.total_atoms > 0 {
            placed as f64 / event.total_atoms as f64 * 100.0
        } else {
            0.0
        };
        let element = serde_json::to_string(&event.element).unwrap_or("\"\"".to_string());
        let json = format!(
            r#"{{"event":"atom_placed","atom_index":{},"total_atoms":{},"element":{},"progress_pct":{:.1}}}"#,
            event.atom_index, event.total_atoms, element, progress_pct
        );
        self.emit_json(&json);
    }

    pub fn emit_fallback_engaged(&self, event: &FallbackEngagedEvent) {
        let json = format!(
            r#"{{"event":"fallback_engaged","attempts":{},"placed":{}}}"#,
            event.attempts, event.placed
        );
        self.emit_json(&json);
    }

    pub fn emit_generation_complete(&self, event: &GenerationCompleteEvent) {
        let json = format!(
            r#"{{"event":"generation_complete","total_atoms":{},"box_size":[{},{},{}],"attempts":{},"elapsed_ms":{}}}"#,
            event.total_atoms,
            event.box_size[0],
            event.box_size[1],
            event.box_size[2],
            event.attempts,
            event.elapsed_ms
        );
        self.emit_json(&json);
    }

    pub fn emit_error(&self, code: &str, message: &str) {
        let code = serde_json::to_string(code).unwrap_or("\"unknown\"".to_string());
        let message = serde_json::to_string(message).unwrap_or("\"Unknown error\"".to_string());
        let json = format!(r#"{{"event":"error","code":{},"message":{}}}"#, code, message);
        self.emit_json(&json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_started_format() {
        let emitter = StreamEmitter::enabled();
        emitter.emit_generation_started(&GenerationStartedEvent {
            num_atoms: 100,
            box_size: [12.6, 12.6, 12.6],
            output_path: Some("out.data".to_string()),
        });
    }

    #[test]
    fn test_disabled_emitter() {
        let emitter = StreamEmitter::disabled();
        assert!(!emitter.is_enabled());
        // Should not panic
        emitter.emit_atom_placed(&AtomPlacedEvent {
            atom_index: 0,
            total_atoms: 10,
            element: "Ti".to_string(),
        });
    }
}
