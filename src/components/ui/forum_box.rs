use leptos::prelude::*;
use leptos_ui::clx;

// Forum page furniture: a bordered box made of stacked cells, with an
// optional breadcrumb header on top.
mod components {
    use super::*;
    clx! {ForumBox, div, "bg-card text-card-foreground flex flex-col rounded-md border shadow-sm overflow-hidden"}
    clx! {BoxHeader, div, "flex flex-wrap items-center gap-1 border-b px-4 py-3 text-sm"}
    clx! {BoxCell, div, "flex flex-col gap-3 border-b px-4 py-3 last:border-b-0"}
    clx! {BoxInner, div, "px-4 py-3 text-xs text-muted-foreground"}
    clx! {Chevron, span, "px-1 text-muted-foreground select-none"}
}

pub use components::*;
