fn main() -> eframe::Result {
    timeline_tool::run_native()
}
