fn main() -> anyhow::Result<()> {
    area_lookup_gen::run()
}
