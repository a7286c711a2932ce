fn main() -> anyhow::Result<()> {
    r16c_driver::main()
}
