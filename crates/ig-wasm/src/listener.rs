//! Window-level `keydown` listener.
//!
//! Registered on attach, removed on drop: detaching the editor (or
//! navigating away and freeing it) leaves no handler behind on `window`.

use crate::bridge::Bridge;
use ig_core::KeyInput;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, Window};

pub(crate) struct KeyListener {
    window: Window,
    closure: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyListener {
    pub(crate) fn attach(bridge: Rc<Bridge>) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let input = KeyInput {
                key: event.key(),
                ctrl: event.ctrl_key(),
                shift: event.shift_key(),
                alt: event.alt_key(),
                meta: event.meta_key(),
            };
            let outcome = bridge.handle_key(&input);
            if outcome.prevent_default {
                event.prevent_default();
            }
            if outcome.consumed {
                event.stop_immediate_propagation();
            }
        });

        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        log::debug!("keydown listener attached");
        Ok(Self { window, closure })
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        let removed = self
            .window
            .remove_event_listener_with_callback("keydown", self.closure.as_ref().unchecked_ref());
        if let Err(e) = removed {
            log::warn!("failed to remove keydown listener: {e:?}");
        }
    }
}
