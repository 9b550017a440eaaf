use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	let session = &config.session;
	let layout = &session.layout;
	let index = &config.index;

	println!("Effective configuration:");
	println!("  Root: {}", config.root.display());
	println!("  Start mode: {}", session.initial_mode.label());
	if !session.initial_query.is_empty() {
		println!("  Initial query: {}", session.initial_query);
	}
	match session.page_size {
		Some(size) => println!("  Page size: {size}"),
		None => println!("  Page size: (list height)"),
	}
	println!("  Prefetch margin: {}", session.prefetch_margin);
	println!("  Suggestion limit: {}", session.suggestion_limit);
	println!("  Include hidden: {}", bool_to_word(index.include_hidden));
	println!("  Follow symlinks: {}", bool_to_word(index.follow_symlinks));
	println!("  Git ignore: {}", bool_to_word(index.git_ignore));
	match index.max_depth {
		Some(depth) => println!("  Max depth: {depth}"),
		None => println!("  Max depth: unlimited"),
	}
	if let Some(threads) = index.threads {
		println!("  Threads: {threads}");
	}
	if !index.global_ignores.is_empty() {
		println!("  Global ignores: {}", index.global_ignores.join(", "));
	}
	println!("  Layout: {:?} x {:?}", layout.width, layout.height);
	println!("  Preview: {}", bool_to_word(layout.show_preview));
	println!("  Preview position: {:?}", layout.preview_position);
	println!("  Preview debounce: {}ms", session.preview_delay.as_millis());
	println!("  Prompt position: {:?}", layout.prompt_position);
	println!("  Border: {}", layout.border.name);
	println!("  Combo: {}", bool_to_word(session.combo.enabled));
	println!("  Boost multiplier: {}", session.boost_multiplier);
	println!("  Debug panel: {}", bool_to_word(layout.show_debug));
	println!("  UI theme: {}", config.theme_name);
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "enabled" } else { "disabled" }
}
