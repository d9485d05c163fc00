//! A chat room and a loader sharing one router.
//!
//! Run with `cargo run --example hello-channels`.

use std::{cell::RefCell, rc::Rc};

use switchboard::prelude::*;

#[derive(Clone, Debug)]
enum Msg {
    Text(String),
    Progress(u8),
}

struct Room {
    name: &'static str,
    members: RefCell<Vec<String>>,
}

fn main() -> switchboard::Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let router = Router::<Msg>::default();
    let room = Rc::new(Room {
        name: "lobby",
        members: RefCell::default(),
    });

    router.on(
        "chat:join",
        callback(|ev| {
            let room = ev
                .target()
                .downcast_ref::<Room>()
                .ok_or_else(|| SwitchboardError::listener("join without a room"))?;
            if let Some(Msg::Text(who)) = ev.arg(0) {
                room.members.borrow_mut().push(who.clone());
                println!("{who} joined {}", room.name);
            }
            Ok(())
        }),
        Some(room.clone()),
    );
    router.on(
        "chat:all",
        callback(|ev| {
            println!("[chat] {} {:?}", ev.name(), ev.args());
            Ok(())
        }),
        None,
    );
    router.on(
        "load:progress",
        callback(|ev| {
            if let Some(Msg::Progress(pct)) = ev.arg(0) {
                println!("loading... {pct}%");
            }
            Ok(())
        }),
        None,
    );
    router.once(
        "load:done",
        callback(|_| {
            println!("loaded");
            Ok(())
        }),
        None,
    );

    router
        .emit("chat:join", &[Msg::Text("alice".into())])?
        .emit("chat:join", &[Msg::Text("bob".into())])?;
    for pct in [25, 50, 100] {
        router.emit("load:progress", &[Msg::Progress(pct)])?;
    }
    router.emit("load:done", &[])?.emit("load:done", &[])?;

    // nobody listens on the default channel
    router.emit("join", &[Msg::Text("carol".into())])?;

    println!("{:#?}", router.snapshot());

    router.off(Some("@load"), Selector::Any)?;
    router.emit("load:progress", &[Msg::Progress(0)])?;

    println!("members of {}: {:?}", room.name, room.members.borrow());
    Ok(())
}
