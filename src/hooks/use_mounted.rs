use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

/// `true` mientras el componente esté montado.
///
/// Las respuestas async que llegan después del unmount se descartan
/// comprobando este flag (no se cancelan los requests).
#[hook]
pub fn use_mounted() -> Rc<RefCell<bool>> {
    let mounted = use_mut_ref(|| true);
    {
        let mounted = mounted.clone();
        use_effect_with((), move |_| {
            *mounted.borrow_mut() = true;
            move || *mounted.borrow_mut() = false
        });
    }
    mounted
}
