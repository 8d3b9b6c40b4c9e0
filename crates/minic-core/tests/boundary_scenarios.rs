//! End-to-end exercises of the six boundary scenarios, driven directly
//! against the core's lexer/value/scope/pre-processor machinery rather
//! than through a real `Evaluator` (statement execution is a host
//! concern out of scope for this crate — see `minic_core::interpreter`).

use minic_core::{Cursor, Evaluator, Interpreter, Platform};
use minic_lex::{Lexer, Payload, TokenKind, TokenReader};
use minic_pp::Preprocessor;
use minic_util::{Interner, Symbol};
use minic_value::{mangle_static_name, Base, LookupResult, Placement, ScopeEngine, SymbolTable, TableEntry};

struct NullEvaluator;
impl Evaluator for NullEvaluator {
    fn exec_translation_unit(&mut self, _interp: &mut Interpreter, _cursor: &mut Cursor) -> Result<(), minic_core::CoreError> {
        Ok(())
    }
    fn exec_interactive_line(&mut self, _interp: &mut Interpreter, _cursor: &mut Cursor) -> Result<(), minic_core::CoreError> {
        Ok(())
    }
    fn call(&mut self, _interp: &mut Interpreter, _name: Symbol, _args: &[minic_value::ValueId], _result: Option<minic_value::ValueId>) -> Result<(), minic_core::CoreError> {
        Ok(())
    }
}

struct NullPlatform;
impl Platform for NullPlatform {
    fn putc(&mut self, _c: u8) {}
    fn get_character(&mut self) -> Option<u8> {
        None
    }
    fn get_line(&mut self, _prompt: &str) -> Option<String> {
        None
    }
    fn exit(&mut self, code: i32) -> ! {
        std::process::exit(code)
    }
    fn read_file(&mut self, _path: &str) -> Option<Vec<u8>> {
        None
    }
}

fn new_interp() -> Interpreter {
    Interpreter::new(Box::new(NullEvaluator), Box::new(NullPlatform))
}

/// Scenario 1: numeric literals in every base decode to the expected value.
#[test]
fn numeric_literals_decode_to_expected_values() {
    let mut interner = Interner::new();
    let source = "0x10 010 0b10 10 1.5e-2";
    let buf = Lexer::new(source, &mut interner).tokenize(TokenKind::Eof).unwrap();
    let mut reader = TokenReader::new(&buf);

    let hex = reader.next();
    assert_eq!(hex.kind, TokenKind::IntegerConstant);
    assert_eq!(hex.payload, Payload::Int(16));

    let octal = reader.next();
    assert_eq!(octal.payload, Payload::Int(8));

    let binary = reader.next();
    assert_eq!(binary.payload, Payload::Int(2));

    let decimal = reader.next();
    assert_eq!(decimal.payload, Payload::Int(10));

    let fp = reader.next();
    assert_eq!(fp.kind, TokenKind::FpConstant);
    assert_eq!(fp.payload, Payload::Fp(1.5e-2));
}

/// Scenario 2: `#if X` tracks a macro's definedness across redefinition
/// and removal, exactly as the nesting counters specify.
#[test]
fn macro_conditional_follows_definition_state() {
    let mut pp = Preprocessor::new();
    let mut interner = Interner::new();
    let x = interner.intern_str("X");

    pp.define_object_macro(x, b"1".to_vec());
    assert!(pp.is_macro_defined(x));
    pp.handle_if(true); // #if X, X defined and non-zero
    assert!(pp.is_active());
    pp.handle_endif().unwrap();

    pp.undef_macro(x);
    pp.define_object_macro(x, b"0".to_vec());
    pp.handle_if(false); // #if X now evaluates to 0
    assert!(!pp.is_active());
    pp.handle_endif().unwrap();

    pp.undef_macro(x);
    assert!(!pp.is_macro_defined(x));
}

/// Scenario 3: a file-local `static` survives across two calls under its
/// mangled name, while the unmangled name is invisible at file scope.
#[test]
fn static_inside_function_persists_across_calls_under_mangled_name() {
    let mut interp = new_interp();
    let mangled = mangle_static_name(&mut interp.interner, "t.c", "f", "n");

    let int_ty = interp.types.base_type(Base::Int);
    let scope = interp.scopes.scope_begin();
    let value = interp
        .values
        .alloc_value_and_copy(&mut interp.arena, &interp.types, int_ty, &0i32.to_le_bytes(), Placement::Heap, scope)
        .unwrap();
    interp.globals.set(mangled, TableEntry::Value { value, file: Symbol::EMPTY, line: 1, column: 1 }).unwrap();

    // Two calls to f() each increment n.
    for _ in 0..2 {
        let current = i32::from_le_bytes(interp.values.read(&interp.arena, &interp.types, value).try_into().unwrap());
        interp.values.write(&mut interp.arena, value, &(current + 1).to_le_bytes());
    }

    let n = interp.interner.intern_str("n");
    assert!(interp.globals.get(n).is_none(), "unmangled name must not be visible at file scope");
    assert_eq!(interp.values.read(&interp.arena, &interp.types, value), 2i32.to_le_bytes());
}

/// Scenario 4: looking up a name after its scope has closed is reported as
/// "out of scope", distinct from a name that was never declared.
#[test]
fn out_of_scope_lookup_is_distinguished_from_undefined() {
    let mut interp = new_interp();
    let mut table = SymbolTable::new();
    let mut scopes = ScopeEngine::new();

    let block = scopes.scope_begin();
    let int_ty = interp.types.base_type(Base::Int);
    let x = interp
        .values
        .alloc_value_and_copy(&mut interp.arena, &interp.types, int_ty, &1i32.to_le_bytes(), Placement::Heap, block)
        .unwrap();
    let x_sym = interp.interner.intern_str("x");
    table.set(x_sym, TableEntry::Value { value: x, file: Symbol::EMPTY, line: 1, column: 1 }).unwrap();
    scopes.scope_end(block, &mut interp.values);

    assert!(matches!(scopes.lookup(&table, &interp.values, x_sym), LookupResult::OutOfScope(_)));
    let undefined_sym = interp.interner.intern_str("y");
    assert!(matches!(scopes.lookup(&table, &interp.values, undefined_sym), LookupResult::Undefined));
}

/// Scenario 5: a function definition fed across four interactive prompts
/// accumulates in the token-line list, and pruning behind the cursor frees
/// everything strictly earlier once the evaluator is done with it.
#[test]
fn interactive_multi_line_definition_accumulates_and_prunes() {
    let mut interp = new_interp();
    for line in ["int f(int x)\n", "{\n", " return x+1;\n", "}\n"] {
        interp.parse("<interactive>", line, true, false).unwrap();
    }
    assert_eq!(interp.interactive_lines().len(), 4);

    // The whole definition must be lift-able as one contiguous token range
    // even though it arrived across four separate prompts.
    let lines = &*interp.interactive_lines();
    let total_len: usize = lines.iter().map(<[u8]>::len).sum();
    let cursor = Cursor::over_interactive_lines(lines);
    let lifted = cursor.copy_tokens(0, total_len);
    let mut reader = TokenReader::new(&lifted);
    let mut kinds = Vec::new();
    loop {
        let tok = reader.next();
        if tok.kind == TokenKind::EndOfFunction {
            break;
        }
        kinds.push(tok.kind);
    }
    assert!(kinds.contains(&TokenKind::Int));
    assert!(kinds.contains(&TokenKind::OpenCurlyBracket));
    assert!(kinds.contains(&TokenKind::Return));
    assert!(kinds.contains(&TokenKind::CloseCurlyBracket));
    // None of the four lines' own `Eof` sentinels leaked into the lifted copy.
    assert!(!kinds.contains(&TokenKind::Eof));

    // The evaluator has finished with the whole definition; everything
    // before the last line can be freed.
    interp.interactive_lines().prune_before_cursor(3);
    assert_eq!(interp.interactive_lines().len(), 1);
}

/// Scenario 6: two string literals with identical bytes intern to the same
/// symbol, so pointer values derived from them compare equal.
#[test]
fn string_literal_sharing_interns_to_the_same_symbol() {
    let mut interner = Interner::new();
    let source = "\"hi\" \"hi\"";
    let buf = Lexer::new(source, &mut interner).tokenize(TokenKind::Eof).unwrap();
    let mut reader = TokenReader::new(&buf);

    let a = reader.next();
    let b = reader.next();
    assert_eq!(a.kind, TokenKind::StringConstant);
    assert_eq!(a.payload, b.payload);
}
