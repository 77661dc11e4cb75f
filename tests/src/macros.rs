/// Builder with the given models registered, in order.
#[macro_export]
macro_rules! models {
    (
        $( $model:ident ),*
    ) => {{
        $crate::init_logging();
        let mut builder = tessel::Db::builder();
        $( builder.register::<$model>(); )*
        builder
    }};
}
