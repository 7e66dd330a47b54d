use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// An event listener on `window` or `document` that detaches itself when
/// dropped. Components keep these in a `StoredValue::new_local` so the
/// listener lives exactly as long as the component.
pub(crate) struct EventBinding {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventBinding {
    pub fn window<E>(event: &'static str, handler: impl FnMut(E) + 'static) -> Option<Self>
    where
        E: JsCast + 'static,
    {
        let window = web_sys::window()?;
        Self::attach(window.into(), event, handler)
    }

    pub fn document<E>(event: &'static str, handler: impl FnMut(E) + 'static) -> Option<Self>
    where
        E: JsCast + 'static,
    {
        let document = web_sys::window()?.document()?;
        Self::attach(document.into(), event, handler)
    }

    fn attach<E>(
        target: web_sys::EventTarget,
        event: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> Option<Self>
    where
        E: JsCast + 'static,
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                handler(e);
            }
        });
        if let Err(err) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to bind {event} listener: {err:?}");
            return None;
        }
        Some(Self {
            target,
            event,
            callback,
        })
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Client position of the first active touch, if any.
pub(crate) fn first_touch(e: &web_sys::TouchEvent) -> Option<(f64, f64)> {
    let touch = e.touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

/// True when the key event came from a text field, where shortcuts must not fire.
pub(crate) fn is_typing_target(e: &web_sys::KeyboardEvent) -> bool {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|el| {
            let tag = el.tag_name();
            tag == "INPUT" || tag == "TEXTAREA" || tag == "SELECT"
        })
        .unwrap_or(false)
}
