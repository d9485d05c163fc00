//! A view that follows a model through `listen_to` and cleans up after
//! itself with `stop_listening`.

use std::cell::RefCell;

use switchboard::prelude::*;

struct Model {
    values: RefCell<Vec<i64>>,
    events: Emitter<i64>,
}

impl Model {
    fn push(&self, value: i64) -> switchboard::Result {
        self.values.borrow_mut().push(value);
        self.trigger("add", &[value])?;
        Ok(())
    }

    fn clear(&self) -> switchboard::Result {
        self.values.borrow_mut().clear();
        self.trigger("reset", &[])?;
        Ok(())
    }
}

impl Events<i64> for Model {
    fn emitter(&self) -> &Emitter<i64> {
        &self.events
    }
}

struct View {
    events: Emitter<i64>,
}

impl Events<i64> for View {
    fn emitter(&self) -> &Emitter<i64> {
        &self.events
    }
}

fn main() -> switchboard::Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let model = Model {
        values: RefCell::default(),
        events: Emitter::new(),
    };
    let view = View {
        events: Emitter::new(),
    };

    view.listen_to(
        &model,
        "add",
        callback(|ev| {
            println!(
                "render {:?} (bound to view: {})",
                ev.args(),
                !ev.target().is_emitter()
            );
            Ok(())
        }),
    )
    .listen_to(
        &model,
        "reset",
        callback(|_| {
            println!("render empty list");
            Ok(())
        }),
    )
    .listen_to_once(
        &model,
        "add",
        callback(|ev| {
            println!("first value arrived: {:?}", ev.arg(0));
            Ok(())
        }),
    );

    model.push(1)?;
    model.push(2)?;
    model.clear()?;
    println!("{:?}", model.emitter());

    view.stop_listening(None, EventNames::Every, Selector::Any);
    model.push(3)?;

    println!(
        "model: {:?}, view listening to {} sources",
        model.values.borrow(),
        view.emitter().listening_count()
    );
    Ok(())
}
