use codepad_common::{Fragment, DEFAULT_SCRIPT};
use codepad_editor::{EditableBuffer, EditorSession, HighlightRegistry, Key, TokenPainter};
use codepad_lexer::{tokenize, Lexer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn paint_large_script(c: &mut Criterion) {
    let source = DEFAULT_SCRIPT.repeat(200);
    let buffer = EditableBuffer::new(Fragment::Script, &source);
    let tokens = tokenize(&source, Fragment::Script);
    let mut registry = HighlightRegistry::new();

    c.bench_function("paint_large_script", |b| {
        b.iter(|| TokenPainter::new(&mut registry).paint(black_box(&buffer), black_box(&tokens)))
    });
}

fn keystroke_frame(c: &mut Criterion) {
    let mut session = EditorSession::new();
    session.run_frame(&Lexer);

    c.bench_function("keystroke_frame", |b| {
        b.iter(|| {
            session.key_down(Fragment::Script, Key::Char('x'));
            session.key_up(Fragment::Script);
            session.run_frame(&Lexer)
        })
    });
}

criterion_group!(benches, paint_large_script, keystroke_frame);
criterion_main!(benches);
