//! A fake driver for tests: no GPU, no context.
//!
//! The "compiler" is deliberately simple. A stage compiles when it starts with a `#version`
//! directive and its braces balance. Linking checks that every attached stage has a `main` and that
//! every fragment input is written by the stage before it. Diagnostics imitate the style of Mesa's
//! GLSL compiler.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::driver::{RawId, ShaderDriver};
use crate::stage::StageKind;

#[derive(Debug, Default)]
struct MockShader {
    kind: Option<StageKind>,
    compiled: bool,
    log: String,
    has_main: bool,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<RawId>,
    linked: bool,
    log: String,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: RawId,
    shaders: HashMap<RawId, MockShader>,
    programs: HashMap<RawId, MockProgram>,
    shaders_created: usize,
    programs_created: usize,
    programs_deleted: usize,
    invalid_deletes: usize,
    use_calls: usize,
    active: Option<RawId>,
    refuse_all: bool,
    refuse_program: bool,
}

impl MockState {
    fn allocate(&mut self) -> RawId {
        self.next_id += 1;
        self.next_id
    }
}

/// Clones share the same fake context.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    state: Rc<RefCell<MockState>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following shader and program allocation return 0.
    pub fn refuse_allocations(&self, refuse: bool) {
        self.state.borrow_mut().refuse_all = refuse;
    }

    /// Makes every following program allocation return 0. Shaders are still allocated.
    pub fn refuse_program_allocation(&self, refuse: bool) {
        self.state.borrow_mut().refuse_program = refuse;
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn is_live_program(&self, id: RawId) -> bool {
        self.state.borrow().programs.contains_key(&id)
    }

    pub fn shaders_created(&self) -> usize {
        self.state.borrow().shaders_created
    }

    pub fn programs_created(&self) -> usize {
        self.state.borrow().programs_created
    }

    pub fn programs_deleted(&self) -> usize {
        self.state.borrow().programs_deleted
    }

    /// Deletions of objects that were never allocated or were already deleted.
    pub fn invalid_deletes(&self) -> usize {
        self.state.borrow().invalid_deletes
    }

    pub fn use_calls(&self) -> usize {
        self.state.borrow().use_calls
    }

    pub fn active_program(&self) -> Option<RawId> {
        self.state.borrow().active
    }
}

impl ShaderDriver for MockDriver {
    fn create_shader(&self, kind: StageKind) -> RawId {
        let mut state = self.state.borrow_mut();
        if state.refuse_all {
            return 0;
        }

        let id = state.allocate();
        state.shaders_created += 1;
        state.shaders.insert(id, MockShader { kind: Some(kind), ..MockShader::default() });
        id
    }

    fn compile_shader(&self, shader: RawId, source: &str) {
        let mut state = self.state.borrow_mut();
        let entry = state.shaders.get_mut(&shader).expect("compiling a deleted shader");
        let kind = entry.kind;

        *entry = compile(source);
        entry.kind = kind;
    }

    fn compile_status(&self, shader: RawId) -> bool {
        self.state.borrow().shaders.get(&shader).map_or(false, |s| s.compiled)
    }

    fn shader_info_log(&self, shader: RawId) -> String {
        self.state.borrow().shaders.get(&shader).map(|s| s.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&self, shader: RawId) {
        let mut state = self.state.borrow_mut();
        if state.shaders.remove(&shader).is_none() && shader != 0 {
            state.invalid_deletes += 1;
        }
    }

    fn create_program(&self) -> RawId {
        let mut state = self.state.borrow_mut();
        if state.refuse_all || state.refuse_program {
            return 0;
        }

        let id = state.allocate();
        state.programs_created += 1;
        state.programs.insert(id, MockProgram::default());
        id
    }

    fn attach_shader(&self, program: RawId, shader: RawId) {
        let mut state = self.state.borrow_mut();
        assert!(state.shaders.contains_key(&shader), "attaching a deleted shader");
        let entry = state.programs.get_mut(&program).expect("attaching to a deleted program");
        entry.attached.push(shader);
    }

    fn detach_shader(&self, program: RawId, shader: RawId) {
        let mut state = self.state.borrow_mut();
        if let Some(entry) = state.programs.get_mut(&program) {
            entry.attached.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: RawId) {
        let mut state = self.state.borrow_mut();
        let attached = match state.programs.get(&program) {
            Some(entry) => entry.attached.clone(),
            None => panic!("linking a deleted program"),
        };

        let log = {
            let shaders: Vec<&MockShader> = attached.iter().filter_map(|id| state.shaders.get(id)).collect();
            link(&shaders)
        };

        let entry = state.programs.get_mut(&program).expect("program vanished while linking");
        entry.linked = log.is_empty();
        entry.log = log;
    }

    fn link_status(&self, program: RawId) -> bool {
        self.state.borrow().programs.get(&program).map_or(false, |p| p.linked)
    }

    fn program_info_log(&self, program: RawId) -> String {
        self.state.borrow().programs.get(&program).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn use_program(&self, program: RawId) {
        let mut state = self.state.borrow_mut();
        let linked = state.programs.get(&program).map_or(false, |p| p.linked);
        assert!(linked, "activating program {} which is not a linked program", program);

        state.use_calls += 1;
        state.active = Some(program);
    }

    fn delete_program(&self, program: RawId) {
        let mut state = self.state.borrow_mut();
        if state.programs.remove(&program).is_some() {
            state.programs_deleted += 1;
            if state.active == Some(program) {
                state.active = None;
            }
        } else if program != 0 {
            state.invalid_deletes += 1;
        }
    }
}

fn compile(source: &str) -> MockShader {
    let mut shader = MockShader::default();
    let lines: Vec<&str> = source.lines().collect();

    let first = lines.iter().enumerate().find(|(_, line)| !line.trim().is_empty());
    let (line_no, first_line) = match first {
        Some((n, line)) => (n + 1, line.trim()),
        None => {
            shader.log = "0:1(1): error: syntax error, unexpected end of file\n".to_string();
            return shader;
        }
    };

    if !first_line.starts_with("#version") {
        let token = first_line.split_whitespace().next().unwrap_or_default();
        shader.log = format!(
            "0:{}(1): preprocessor error: syntax error, unexpected IDENTIFIER \"{}\", expecting #version\n",
            line_no, token
        );
        return shader;
    }

    let opened = source.matches('{').count();
    let closed = source.matches('}').count();
    if opened != closed {
        shader.log = format!("0:{}(1): error: syntax error, unexpected end of file\n", lines.len());
        return shader;
    }

    for line in &lines {
        let (direction, name) = match interface_variable(line) {
            Some(decl) => decl,
            None => continue,
        };
        match direction {
            "in" => shader.inputs.push(name),
            _ => shader.outputs.push(name),
        }
    }

    shader.has_main = source.contains("void main");
    shader.compiled = true;
    shader
}

/// Parses `[layout (...)] in|out <type> <name>;` into its direction and name.
fn interface_variable(line: &str) -> Option<(&'static str, String)> {
    let mut line = line.trim();
    if line.starts_with("layout") {
        let close = line.find(')')?;
        line = line[close + 1..].trim_start();
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let direction = match tokens.first() {
        Some(&"in") => "in",
        Some(&"out") => "out",
        _ => return None,
    };

    let name = tokens.get(2)?.trim_end_matches(';');
    let name = name.split('[').next().unwrap_or(name);
    Some((direction, name.to_string()))
}

fn link(shaders: &[&MockShader]) -> String {
    if shaders.is_empty() {
        return "error: linking with no shaders attached\n".to_string();
    }

    let mut log = String::new();
    for shader in shaders {
        if !shader.has_main {
            log.push_str(&format!("error: {} shader lacks `main'\n", stage_name(shader)));
        }
    }

    let find = |kind: StageKind| shaders.iter().find(|s| s.kind == Some(kind));
    let previous = find(StageKind::Geometry).or_else(|| find(StageKind::Vertex));

    if let (Some(fragment), Some(previous)) = (find(StageKind::Fragment), previous) {
        for input in &fragment.inputs {
            if !previous.outputs.contains(input) {
                log.push_str(&format!(
                    "error: fragment shader input `{}' has no matching output in the previous stage\n",
                    input
                ));
            }
        }
    }

    log
}

fn stage_name(shader: &MockShader) -> &'static str {
    shader.kind.map_or("unknown", StageKind::name)
}
